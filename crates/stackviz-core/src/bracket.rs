use serde::{Deserialize, Serialize};

/// Which bracket pair a symbol belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketKind {
    Parentheses, // ( )
    Square,      // [ ]
    Curly,       // { }
    None,
}

impl BracketKind {
    pub fn of(ch: char) -> Self {
        match ch {
            '(' | ')' => BracketKind::Parentheses,
            '[' | ']' => BracketKind::Square,
            '{' | '}' => BracketKind::Curly,
            _ => BracketKind::None,
        }
    }

    /// The `(open, close)` pair for this kind, if it has one.
    pub fn pair(self) -> Option<(char, char)> {
        match self {
            BracketKind::Parentheses => Some(('(', ')')),
            BracketKind::Square => Some(('[', ']')),
            BracketKind::Curly => Some(('{', '}')),
            BracketKind::None => None,
        }
    }
}

/// Whether a symbol opens a frame, closes one, or is ignored by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Opening,
    Closing,
    Other,
}

impl Role {
    pub fn of(ch: char) -> Self {
        match ch {
            '(' | '[' | '{' => Role::Opening,
            ')' | ']' | '}' => Role::Closing,
            _ => Role::Other,
        }
    }
}

/// Closing counterpart of an opening symbol.
pub fn closing_for(open: char) -> Option<char> {
    match Role::of(open) {
        Role::Opening => BracketKind::of(open).pair().map(|(_, close)| close),
        _ => None,
    }
}

/// Opening counterpart of a closing symbol.
pub fn opening_for(close: char) -> Option<char> {
    match Role::of(close) {
        Role::Closing => BracketKind::of(close).pair().map(|(open, _)| open),
        _ => None,
    }
}

/// A still-open bracket awaiting its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    #[serde(rename = "char")]
    pub symbol: char,
    pub kind: BracketKind,
    pub position: usize,
}

impl StackFrame {
    pub fn new(symbol: char, position: usize) -> Self {
        Self {
            symbol,
            kind: BracketKind::of(symbol),
            position,
        }
    }

    /// The symbol that closes this frame.
    pub fn expected_closing(&self) -> Option<char> {
        closing_for(self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_covers_all_six_symbols() {
        let cases = [
            ('(', BracketKind::Parentheses, Role::Opening),
            (')', BracketKind::Parentheses, Role::Closing),
            ('[', BracketKind::Square, Role::Opening),
            (']', BracketKind::Square, Role::Closing),
            ('{', BracketKind::Curly, Role::Opening),
            ('}', BracketKind::Curly, Role::Closing),
        ];

        for (ch, kind, role) in cases {
            assert_eq!(BracketKind::of(ch), kind, "kind of {ch}");
            assert_eq!(Role::of(ch), role, "role of {ch}");
        }
    }

    #[test]
    fn test_other_characters() {
        for ch in ['a', '+', ' ', '<', '>', 'é', '0'] {
            assert_eq!(BracketKind::of(ch), BracketKind::None);
            assert_eq!(Role::of(ch), Role::Other);
        }
    }

    #[test]
    fn test_pairing() {
        assert_eq!(closing_for('('), Some(')'));
        assert_eq!(closing_for('['), Some(']'));
        assert_eq!(closing_for('{'), Some('}'));
        assert_eq!(closing_for(')'), None);
        assert_eq!(opening_for('}'), Some('{'));
        assert_eq!(opening_for('{'), None);
        assert_eq!(opening_for('x'), None);
    }

    #[test]
    fn test_frame_expected_closing() {
        let frame = StackFrame::new('[', 4);
        assert_eq!(frame.kind, BracketKind::Square);
        assert_eq!(frame.expected_closing(), Some(']'));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&BracketKind::Parentheses).unwrap();
        assert_eq!(json, "\"parentheses\"");
        let json = serde_json::to_string(&BracketKind::None).unwrap();
        assert_eq!(json, "\"none\"");
    }
}
