/// Marker of an absent child
pub(crate) const NIL: &[u8] = b"nil";

/// Opens a node
pub(crate) const NODE_OPEN: u8 = b'(';

/// Closes a node
pub(crate) const NODE_CLOSE: u8 = b')';

/// Delimits node names
pub(crate) const NAME_QUOTE: u8 = b'"';

/// Indentation per depth level of [WriterStyle::Indented](crate::format::WriterStyle::Indented)
pub(crate) const INDENT: &str = "  ";
