//! Resolution behaviour switches.

/// Treatment of configuration keys the schema does not declare.
///
/// Applies inside a known record's subtree; unknown top-level sections are
/// always ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Log the key at `warn` level and carry on.
    #[default]
    Ignore,
    /// Fail with [`crate::ArgsError::UnknownConfigKey`].
    Reject,
}

/// Tokens accepted for boolean fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoolSyntax {
    /// Only `true` and `false`, in any case.
    #[default]
    Strict,
    /// Also `yes`/`no`, `on`/`off` and `1`/`0`, in any case.
    Extended,
}

impl BoolSyntax {
    /// Interpret `token`, returning `None` when it is not a boolean.
    ///
    /// ```
    /// use record_args::BoolSyntax;
    ///
    /// assert_eq!(BoolSyntax::Strict.parse("TRUE"), Some(true));
    /// assert_eq!(BoolSyntax::Strict.parse("yes"), None);
    /// assert_eq!(BoolSyntax::Extended.parse("off"), Some(false));
    /// ```
    #[must_use]
    pub fn parse(self, token: &str) -> Option<bool> {
        let lowered = token.trim().to_ascii_lowercase();
        match (lowered.as_str(), self) {
            ("true", _) | ("yes" | "on" | "1", Self::Extended) => Some(true),
            ("false", _) | ("no" | "off" | "0", Self::Extended) => Some(false),
            _ => None,
        }
    }
}

/// Options applied to every resolution performed by a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Policy for undeclared keys inside a record's configuration subtree.
    pub unknown_keys: UnknownKeyPolicy,
    /// Accepted boolean tokens.
    pub bool_syntax: BoolSyntax,
}

impl ResolverOptions {
    /// Set the unknown-key policy.
    #[must_use]
    pub const fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Set the boolean syntax.
    #[must_use]
    pub const fn bool_syntax(mut self, syntax: BoolSyntax) -> Self {
        self.bool_syntax = syntax;
        self
    }
}
