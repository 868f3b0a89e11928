use sophia::api::term::{IriRef, LanguageTag, SimpleTerm};

use super::{RuntimeError, RuntimeResult};
use crate::vocab::{rdf, xsd};

/// An RDF literal, detached from any graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub lexical: String,
    pub datatype: String,
    pub language: Option<String>,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    pub fn with_language(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: rdf::LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }

    /// Literal for a native value
    pub fn typed<T: LiteralValue>(value: &T) -> Self {
        Self::new(value.to_lexical(), T::DATATYPE)
    }

    /// Convert back to a native value
    ///
    /// The datatype is not checked: `"42"^^xsd:integer` reads as `i32` just
    /// like `"42"^^xsd:int`.
    pub fn parse<T: LiteralValue>(&self) -> Option<T> {
        T::from_lexical(&self.lexical)
    }

    /// Like [`parse`](Self::parse), failing with
    /// [`RuntimeError::InvalidLiteral`] when the lexical form does not fit
    pub fn decode<T: LiteralValue>(&self) -> RuntimeResult<T> {
        self.parse().ok_or_else(|| RuntimeError::InvalidLiteral {
            lexical: self.lexical.clone(),
            datatype: T::DATATYPE.to_string(),
        })
    }

    pub fn to_term(&self) -> SimpleTerm<'static> {
        match &self.language {
            Some(tag) => SimpleTerm::LiteralLanguage(
                self.lexical.clone().into(),
                LanguageTag::new_unchecked(tag.clone().into()),
            ),
            None => SimpleTerm::LiteralDatatype(
                self.lexical.clone().into(),
                IriRef::new_unchecked(self.datatype.clone().into()),
            ),
        }
    }

    pub fn from_term(term: &SimpleTerm<'_>) -> Option<Self> {
        match term {
            SimpleTerm::LiteralDatatype(lex, dt) => Some(Self::new(lex.to_string(), dt.to_string())),
            SimpleTerm::LiteralLanguage(lex, tag) => {
                Some(Self::with_language(lex.to_string(), tag.as_str()))
            }
            _ => None,
        }
    }
}

/// A native type stored as a typed literal
pub trait LiteralValue: Sized {
    /// XSD datatype IRI written for this type
    const DATATYPE: &'static str;

    fn to_lexical(&self) -> String;

    fn from_lexical(lexical: &str) -> Option<Self>;
}

impl LiteralValue for String {
    const DATATYPE: &'static str = xsd::STRING;

    fn to_lexical(&self) -> String {
        self.clone()
    }

    fn from_lexical(lexical: &str) -> Option<Self> {
        Some(lexical.to_string())
    }
}

impl LiteralValue for bool {
    const DATATYPE: &'static str = xsd::BOOLEAN;

    fn to_lexical(&self) -> String {
        self.to_string()
    }

    fn from_lexical(lexical: &str) -> Option<Self> {
        match lexical.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

macro_rules! integer_literal {
    ($ty:ty, $datatype:expr) => {
        impl LiteralValue for $ty {
            const DATATYPE: &'static str = $datatype;

            fn to_lexical(&self) -> String {
                self.to_string()
            }

            fn from_lexical(lexical: &str) -> Option<Self> {
                let trimmed = lexical.trim();
                trimmed
                    .strip_prefix('+')
                    .unwrap_or(trimmed)
                    .parse()
                    .ok()
            }
        }
    };
}

integer_literal!(i8, xsd::BYTE);
integer_literal!(i16, xsd::SHORT);
integer_literal!(i32, xsd::INT);
integer_literal!(i64, xsd::LONG);

macro_rules! float_literal {
    ($ty:ty, $datatype:expr) => {
        impl LiteralValue for $ty {
            const DATATYPE: &'static str = $datatype;

            fn to_lexical(&self) -> String {
                if self.is_nan() {
                    "NaN".to_string()
                } else if self.is_infinite() {
                    let lexical = if self.is_sign_positive() { "INF" } else { "-INF" };
                    lexical.to_string()
                } else {
                    self.to_string()
                }
            }

            fn from_lexical(lexical: &str) -> Option<Self> {
                match lexical.trim() {
                    "NaN" => Some(<$ty>::NAN),
                    "INF" | "+INF" => Some(<$ty>::INFINITY),
                    "-INF" => Some(<$ty>::NEG_INFINITY),
                    other => other.parse().ok(),
                }
            }
        }
    };
}

float_literal!(f32, xsd::FLOAT);
float_literal!(f64, xsd::DOUBLE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reports_invalid_lexical_form() {
        let lit = Literal::new("forty-two", xsd::INT);
        let err = lit.decode::<i32>().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidLiteral { ref datatype, .. } if datatype == xsd::INT
        ));
        assert_eq!(Literal::new("7", xsd::INT).decode::<i64>().unwrap(), 7);
    }

    #[test]
    fn typed_literals_carry_datatype() {
        let lit = Literal::typed(&42i32);
        assert_eq!(lit.lexical, "42");
        assert_eq!(lit.datatype, xsd::INT);
        assert_eq!(lit.parse::<i32>(), Some(42));
    }

    #[test]
    fn integers_accept_leading_plus() {
        assert_eq!(i64::from_lexical("+17"), Some(17));
        assert_eq!(i8::from_lexical("300"), None);
    }

    #[test]
    fn booleans_accept_numeric_forms() {
        assert_eq!(bool::from_lexical("1"), Some(true));
        assert_eq!(bool::from_lexical("false"), Some(false));
        assert_eq!(bool::from_lexical("yes"), None);
    }

    #[test]
    fn float_special_values_use_xsd_spelling() {
        assert_eq!(f64::INFINITY.to_lexical(), "INF");
        assert_eq!(f32::NEG_INFINITY.to_lexical(), "-INF");
        assert_eq!(f64::NAN.to_lexical(), "NaN");
        assert!(f64::from_lexical("NaN").unwrap().is_nan());
        assert_eq!(f32::from_lexical("2.5"), Some(2.5));
    }

    #[test]
    fn literal_term_conversion_keeps_language() {
        let lit = Literal::with_language("Osoba", "cs");
        let back = Literal::from_term(&lit.to_term()).unwrap();
        assert_eq!(back.language.as_deref(), Some("cs"));
        assert_eq!(back.lexical, "Osoba");
    }
}
