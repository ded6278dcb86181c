use core::fmt;

/// The label of one top-level codec call.
///
/// It scopes `@required CONTEXT` on decode and `@encode-context CONTEXT` on
/// encode. The same context is passed down to every nested object of the
/// call; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context<'a>(&'a str);

impl<'a> Context<'a> {
    /// The empty context.
    pub const NONE: Context<'static> = Context("");

    #[inline]
    pub const fn new(label: &'a str) -> Self {
        Self(label)
    }

    #[inline]
    pub const fn label(self) -> &'a str {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a str> for Context<'a> {
    #[inline]
    fn from(label: &'a str) -> Self {
        Self(label)
    }
}

impl fmt::Display for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(self.0)
        }
    }
}
