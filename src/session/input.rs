/// How a single target character renders against the typed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Matched,
    Mismatched(char),
    Pending,
}

/// Text typed so far for the active line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Append a typed character. A lone space is discarded so an accidental
/// space at the start of a line never sticks.
pub fn process_char(buffer: &mut InputBuffer, ch: char) {
    buffer.text.push(ch);
    if buffer.text == " " {
        buffer.text.clear();
    }
}

pub fn process_backspace(buffer: &mut InputBuffer) {
    buffer.text.pop();
}

/// Exact match against the target with surrounding whitespace ignored.
pub fn is_complete(buffer: &InputBuffer, target: &str) -> bool {
    buffer.text == target.trim()
}

/// Prefix-wise comparison of each target position with the buffer. There is
/// no realignment after a wrong character.
pub fn classify(target: &str, buffer: &InputBuffer) -> Vec<CharStatus> {
    let mut typed = buffer.text.chars();
    target
        .chars()
        .map(|expected| match typed.next() {
            Some(actual) if actual == expected => CharStatus::Matched,
            Some(actual) => CharStatus::Mismatched(actual),
            None => CharStatus::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputBuffer {
        let mut buffer = InputBuffer::new();
        for ch in s.chars() {
            process_char(&mut buffer, ch);
        }
        buffer
    }

    #[test]
    fn test_leading_space_collapses() {
        let mut buffer = InputBuffer::new();
        process_char(&mut buffer, ' ');
        assert!(buffer.is_empty());
        process_char(&mut buffer, 'a');
        process_char(&mut buffer, ' ');
        assert_eq!(buffer.as_str(), "a ");
    }

    #[test]
    fn test_backspace_never_underflows() {
        let mut buffer = typed("a");
        for _ in 0..5 {
            process_backspace(&mut buffer);
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut buffer = typed("né");
        process_backspace(&mut buffer);
        assert_eq!(buffer.as_str(), "n");
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_completion_is_exact() {
        assert!(is_complete(&typed("cat dog"), "cat dog"));
        assert!(!is_complete(&typed("cat do"), "cat dog"));
        assert!(!is_complete(&typed("cat dog "), "cat dog"));
        assert!(is_complete(&typed("cat dog"), "cat dog "));
    }

    #[test]
    fn test_classify_prefix_diff() {
        use CharStatus::*;
        assert_eq!(classify("hat", &typed("ho")), vec![Matched, Mismatched('o'), Pending]);
        assert_eq!(classify("hat", &typed("hot")), vec![Matched, Mismatched('o'), Matched]);
        assert_eq!(classify("hat", &typed("")), vec![Pending, Pending, Pending]);
    }

    #[test]
    fn test_classify_does_not_realign() {
        use CharStatus::*;
        // A dropped letter shifts every following position.
        assert_eq!(
            classify("the", &typed("te")),
            vec![Matched, Mismatched('e'), Pending]
        );
    }

    #[test]
    fn test_classify_ignores_overflow() {
        let statuses = classify("a", &typed("abc"));
        assert_eq!(statuses, vec![CharStatus::Matched]);
    }
}
