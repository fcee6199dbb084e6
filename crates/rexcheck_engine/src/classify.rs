//! Map `regex-syntax` errors onto [`ErrorClass`].
//!
//! Anything the parser reports as a malformed pattern becomes a classified rejection. Constructs that are valid
//! ECMAScript but outside what the `regex` crate can execute (look-around, some Unicode case tables) are engine faults
//! instead, so a conformance expectation never passes by accident.

use regex_syntax::{ast, hir};
use rexcheck_core::{CompileError, CompileFailure, EngineFault, ErrorClass, FaultKind};

/// Classify a parse or translation error.
pub(crate) fn classify(err: &regex_syntax::Error) -> CompileFailure {
    let message = err.to_string();
    let class = match err {
        regex_syntax::Error::Parse(e) => ast_class(e.kind()),
        regex_syntax::Error::Translate(e) => hir_class(e.kind()),
        _ => Err(FaultKind::Internal),
    };
    tracing::debug!(?class, "classified pattern error");
    match class {
        Ok(class) => CompileError::new(class, message).into(),
        Err(kind) => EngineFault::new(kind, message).into(),
    }
}

/// Classify a failure of the final `regex` build step.
pub(crate) fn classify_build(err: regex::Error) -> CompileFailure {
    match err {
        regex::Error::CompiledTooBig(limit) => CompileError::new(
            ErrorClass::Complexity,
            format!("compiled program exceeds size limit of {limit} bytes"),
        )
        .into(),
        regex::Error::Syntax(message) => CompileError::new(ErrorClass::Syntax, message).into(),
        other => EngineFault::new(FaultKind::Internal, other.to_string()).into(),
    }
}

fn ast_class(kind: &ast::ErrorKind) -> Result<ErrorClass, FaultKind> {
    use ast::ErrorKind as K;

    Ok(match kind {
        K::GroupUnclosed | K::GroupUnopened => ErrorClass::Paren,
        K::ClassUnclosed => ErrorClass::Brack,
        K::ClassRangeInvalid | K::ClassRangeLiteral => ErrorClass::Range,
        K::ClassEscapeInvalid
        | K::EscapeHexEmpty
        | K::EscapeHexInvalid
        | K::EscapeHexInvalidDigit
        | K::EscapeUnexpectedEof
        | K::EscapeUnrecognized => ErrorClass::Escape,
        K::RepetitionCountUnclosed => ErrorClass::Brace,
        K::RepetitionCountInvalid | K::RepetitionCountDecimalEmpty | K::DecimalEmpty | K::DecimalInvalid => {
            ErrorClass::BadBrace
        }
        K::RepetitionMissing => ErrorClass::BadRepeat,
        K::UnsupportedBackreference => ErrorClass::Backref,
        K::UnicodeClassInvalid => ErrorClass::Ctype,
        K::CaptureLimitExceeded => ErrorClass::Complexity,
        K::NestLimitExceeded(_) => ErrorClass::Stack,
        K::UnsupportedLookAround => return Err(FaultKind::UnsupportedFeature),
        _ => ErrorClass::Syntax,
    })
}

fn hir_class(kind: &hir::ErrorKind) -> Result<ErrorClass, FaultKind> {
    use hir::ErrorKind as K;

    Ok(match kind {
        K::UnicodePropertyNotFound | K::UnicodePropertyValueNotFound | K::UnicodePerlClassNotFound => {
            ErrorClass::Ctype
        }
        K::UnicodeCaseUnavailable => return Err(FaultKind::UnsupportedFeature),
        _ => ErrorClass::Syntax,
    })
}
