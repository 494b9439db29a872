//! Node text storage.
//!
//! Text of parsed nodes is never copied out of the file buffer: such nodes
//! store a [NodeText::Borrowed] range into the buffer kept by their
//! [FactTree](crate::FactTree). Text typed in later (new entities and
//! qualifiers) has no buffer to live in and is stored as [NodeText::Owned].
//!
//! The variant is the ownership record; nothing is inferred from addresses.
//! Dropping a node releases owned text only, while borrowed ranges disappear
//! together with the buffer.

// =#========================================================================#=
// NODE TEXT
// =#========================================================================$=
/// Text of a node, either a range of the tree's backing buffer or an owned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeText {
    /// Byte range `offset..offset + len` of the backing buffer.
    Borrowed {
        /// Start of the text in the buffer
        offset: usize,
        /// Length of the text in bytes
        len: usize,
    },
    /// Independently owned text.
    Owned(String),
}

/// How the text of a node is held, as reported by
/// [FactTree::ownership](crate::FactTree::ownership).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Slice of the backing buffer (released with the buffer)
    Buffer,
    /// Heap string owned by the node (released with the node)
    Owned,
}

impl NodeText {
    /// Creates borrowed text for the buffer range `offset..offset + len`.
    pub fn borrowed(offset: usize, len: usize) -> Self {
        NodeText::Borrowed { offset, len }
    }

    /// Creates owned text.
    pub fn owned<S: Into<String>>(text: S) -> Self {
        NodeText::Owned(text.into())
    }

    /// Returns how this text is held.
    pub fn ownership(&self) -> Ownership {
        match self {
            NodeText::Borrowed { .. } => Ownership::Buffer,
            NodeText::Owned(_) => Ownership::Owned,
        }
    }

    /// Returns `true` if this text is a range of the backing buffer.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, NodeText::Borrowed { .. })
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        match self {
            NodeText::Borrowed { len, .. } => *len,
            NodeText::Owned(text) => text.len(),
        }
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the text against the backing buffer it may borrow from.
    ///
    /// # Arguments
    /// * `buffer` - The backing buffer of the tree owning this text
    ///
    /// # Returns
    /// The text, or an empty string if a borrowed range is not a valid
    /// range of `buffer` (only possible if text and buffer got mixed up).
    pub fn resolve<'a>(&'a self, buffer: &'a str) -> &'a str {
        match self {
            NodeText::Borrowed { offset, len } => buffer.get(*offset..*offset + *len).unwrap_or(""),
            NodeText::Owned(text) => text,
        }
    }

    /// Returns `true` if a borrowed range lies within a buffer of `buffer_len` bytes.
    /// Owned text is always in bounds.
    pub(crate) fn fits(&self, buffer_len: usize) -> bool {
        match self {
            NodeText::Borrowed { offset, len } => offset.checked_add(*len).is_some_and(|end| end <= buffer_len),
            NodeText::Owned(_) => true,
        }
    }
}
