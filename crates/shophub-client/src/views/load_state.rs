/// Result of the most recent load of a single resource.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Status of a view whose data survives a failed refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ready = LoadState::Ready(3);
        assert_eq!(ready.value(), Some(&3));
        assert!(!ready.is_loading());

        let failed: LoadState<i32> = LoadState::Failed("timeout".into());
        assert_eq!(failed.error(), Some("timeout"));
        assert!(LoadState::<i32>::default().is_loading());
        assert!(Status::default().is_loading());
    }
}
