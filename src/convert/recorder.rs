/// Tracks whether any part of a value had to be replaced while converting it.
///
/// One recorder belongs to exactly one top-level resolution and is passed by
/// `&mut` into every nested conversion. Once an error is marked it stays marked.
#[derive(Debug, Default)]
pub struct ConvertErrorRecorder {
    has_error: bool,
}

impl ConvertErrorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that some sub-value could not be read as expected.
    pub fn mark_error(&mut self) {
        self.has_error = true;
    }

    pub fn is_fully_valid(&self) -> bool {
        !self.has_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_error_is_sticky() {
        let mut recorder = ConvertErrorRecorder::new();
        assert!(recorder.is_fully_valid());

        recorder.mark_error();
        recorder.mark_error();
        assert!(!recorder.is_fully_valid());
    }
}
