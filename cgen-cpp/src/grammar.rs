//! The modifier grammar of C++ functions and methods.
//!
//! Legal modifier combinations are described by two tables: pairs that
//! exclude each other and modifiers that require another one. [`Modifiers::check`]
//! evaluates them without producing any text, so the grammar can be tested
//! on its own.

use std::fmt;

use thiserror::Error;

/// A keyword that changes the meaning of a function, method or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Static,
    Const,
    Constexpr,
    Virtual,
    PureVirtual,
    Override,
    Final,
    Inline,
    Extern,
}

impl Modifier {
    /// Every method modifier, in the order they are reported.
    pub const METHOD: [Modifier; 8] = [
        Modifier::Static,
        Modifier::Constexpr,
        Modifier::Virtual,
        Modifier::Inline,
        Modifier::PureVirtual,
        Modifier::Const,
        Modifier::Override,
        Modifier::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Const => "const",
            Self::Constexpr => "constexpr",
            Self::Virtual => "virtual",
            Self::PureVirtual => "pure virtual",
            Self::Override => "override",
            Self::Final => "final",
            Self::Inline => "inline",
            Self::Extern => "extern",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broken grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{modifier} cannot be combined with {with}")]
    Conflict { modifier: Modifier, with: Modifier },

    #[error("{modifier} requires {requires}")]
    Requires {
        modifier: Modifier,
        requires: Modifier,
    },

    #[error("pure virtual method cannot have an implementation")]
    PureVirtualWithBody,

    #[error("constexpr requires an implementation")]
    ConstexprWithoutBody,

    #[error("constructor cannot be declared {0}")]
    ConstructorModifier(Modifier),

    #[error("constructor cannot have a return type")]
    ConstructorReturnType,

    #[error("constexpr variable requires a value")]
    ConstexprWithoutValue,

    #[error("extern variable cannot be initialized")]
    ExternWithValue,

    #[error("array needs a size or at least one item")]
    UnsizedArray,
}

const EXCLUSIONS: [(Modifier, Modifier); 9] = [
    (Modifier::Static, Modifier::Const),
    (Modifier::Static, Modifier::Virtual),
    (Modifier::Static, Modifier::PureVirtual),
    (Modifier::Constexpr, Modifier::Virtual),
    (Modifier::Constexpr, Modifier::PureVirtual),
    (Modifier::Inline, Modifier::Virtual),
    (Modifier::Inline, Modifier::PureVirtual),
    (Modifier::Const, Modifier::Virtual),
    (Modifier::Const, Modifier::PureVirtual),
];

const REQUIREMENTS: [(Modifier, Modifier); 3] = [
    (Modifier::Override, Modifier::Virtual),
    (Modifier::Final, Modifier::Virtual),
    (Modifier::PureVirtual, Modifier::Virtual),
];

/// Boolean modifiers of a function or method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub is_inline: bool,
}

impl Modifiers {
    /// Whether `modifier` is set.
    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Static => self.is_static,
            Modifier::Const => self.is_const,
            Modifier::Constexpr => self.is_constexpr,
            Modifier::Virtual => self.is_virtual,
            Modifier::PureVirtual => self.is_pure_virtual,
            Modifier::Override => self.is_override,
            Modifier::Final => self.is_final,
            Modifier::Inline => self.is_inline,
            Modifier::Extern => false,
        }
    }

    /// Set or clear `modifier`. `Extern` is not a method modifier and is ignored.
    pub fn set(&mut self, modifier: Modifier, value: bool) {
        match modifier {
            Modifier::Static => self.is_static = value,
            Modifier::Const => self.is_const = value,
            Modifier::Constexpr => self.is_constexpr = value,
            Modifier::Virtual => self.is_virtual = value,
            Modifier::PureVirtual => self.is_pure_virtual = value,
            Modifier::Override => self.is_override = value,
            Modifier::Final => self.is_final = value,
            Modifier::Inline => self.is_inline = value,
            Modifier::Extern => {}
        }
    }

    /// The modifiers that are set, in [`Modifier::METHOD`] order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::METHOD.into_iter().filter(|m| self.has(*m))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Check the method grammar. `has_body` tells whether an implementation is attached.
    pub fn check(&self, has_body: bool) -> Result<(), Violation> {
        for (modifier, with) in EXCLUSIONS {
            if self.has(modifier) && self.has(with) {
                return Err(Violation::Conflict { modifier, with });
            }
        }
        for (modifier, requires) in REQUIREMENTS {
            if self.has(modifier) && !self.has(requires) {
                return Err(Violation::Requires { modifier, requires });
            }
        }
        if self.is_pure_virtual && has_body {
            return Err(Violation::PureVirtualWithBody);
        }
        if self.is_constexpr && !has_body {
            return Err(Violation::ConstexprWithoutBody);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(modifiers: &[Modifier]) -> Modifiers {
        let mut m = Modifiers::default();
        for modifier in modifiers {
            m.set(*modifier, true);
        }
        m
    }

    #[test]
    fn test_plain_method_is_legal() {
        assert_eq!(Modifiers::default().check(true), Ok(()));
        assert_eq!(Modifiers::default().check(false), Ok(()));
    }

    #[test]
    fn test_every_exclusion_is_rejected() {
        for (a, b) in EXCLUSIONS {
            let mut m = with(&[a, b]);
            // Satisfy requirements so only the exclusion can fire.
            if b == Modifier::PureVirtual {
                m.is_virtual = true;
            }
            let err = m.check(a == Modifier::Constexpr).unwrap_err();
            assert!(
                matches!(err, Violation::Conflict { .. }),
                "{a} + {b} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_requirements() {
        assert_eq!(
            with(&[Modifier::Override]).check(true),
            Err(Violation::Requires {
                modifier: Modifier::Override,
                requires: Modifier::Virtual
            })
        );
        assert_eq!(
            with(&[Modifier::Final]).check(true),
            Err(Violation::Requires {
                modifier: Modifier::Final,
                requires: Modifier::Virtual
            })
        );
        assert_eq!(
            with(&[Modifier::PureVirtual]).check(false),
            Err(Violation::Requires {
                modifier: Modifier::PureVirtual,
                requires: Modifier::Virtual
            })
        );
    }

    #[test]
    fn test_body_rules() {
        let pure = with(&[Modifier::Virtual, Modifier::PureVirtual]);
        assert_eq!(pure.check(false), Ok(()));
        assert_eq!(pure.check(true), Err(Violation::PureVirtualWithBody));

        let constexpr = with(&[Modifier::Constexpr]);
        assert_eq!(constexpr.check(true), Ok(()));
        assert_eq!(constexpr.check(false), Err(Violation::ConstexprWithoutBody));
    }

    #[test]
    fn test_legal_combinations() {
        let legal: &[&[Modifier]] = &[
            &[Modifier::Static],
            &[Modifier::Const],
            &[Modifier::Inline],
            &[Modifier::Inline, Modifier::Const],
            &[Modifier::Static, Modifier::Inline],
            &[Modifier::Virtual],
            &[Modifier::Virtual, Modifier::Override],
            &[Modifier::Virtual, Modifier::Final],
            &[Modifier::Virtual, Modifier::Override, Modifier::Final],
            &[Modifier::Static, Modifier::Constexpr],
            &[Modifier::Constexpr, Modifier::Const],
        ];
        for modifiers in legal {
            assert_eq!(with(modifiers).check(true), Ok(()), "{modifiers:?}");
        }
    }

    /// Legality of a combination, spelled out rule by rule.
    fn is_legal(m: &Modifiers, has_body: bool) -> bool {
        let virtual_like = m.is_virtual || m.is_pure_virtual;
        !(m.is_static && (m.is_const || virtual_like))
            && !(m.is_constexpr && virtual_like)
            && !(m.is_inline && virtual_like)
            && !(m.is_const && virtual_like)
            && (m.is_virtual || !m.is_override)
            && (m.is_virtual || !m.is_final)
            && (m.is_virtual || !m.is_pure_virtual)
            && !(m.is_pure_virtual && has_body)
            && (has_body || !m.is_constexpr)
    }

    #[test]
    fn test_every_combination() {
        let mut legal = 0;
        for bits in 0u16..1 << Modifier::METHOD.len() {
            let mut m = Modifiers::default();
            for (i, modifier) in Modifier::METHOD.into_iter().enumerate() {
                m.set(modifier, bits & (1 << i) != 0);
            }
            for has_body in [false, true] {
                let expected = is_legal(&m, has_body);
                assert_eq!(
                    m.check(has_body).is_ok(),
                    expected,
                    "{:?} with body: {has_body}",
                    m.iter().collect::<Vec<_>>()
                );
                legal += usize::from(expected);
            }
        }
        assert!(legal > 0);
    }

    #[test]
    fn test_iter_order() {
        let m = with(&[Modifier::Final, Modifier::Virtual, Modifier::Static]);
        let set: Vec<_> = m.iter().collect();
        assert_eq!(
            set,
            vec![Modifier::Static, Modifier::Virtual, Modifier::Final]
        );
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::Conflict {
            modifier: Modifier::Static,
            with: Modifier::Const,
        };
        assert_eq!(v.to_string(), "static cannot be combined with const");
        assert_eq!(
            Violation::ConstructorModifier(Modifier::PureVirtual).to_string(),
            "constructor cannot be declared pure virtual"
        );
    }
}
