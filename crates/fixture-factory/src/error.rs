//! Error types for the fixture-factory crate.
//!
//! Every failure aborts the whole `create` call: no partially built instance
//! is ever handed back to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving or constructing a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// A constructor parameter cannot be resolved into any known kind.
    #[error("parameter '{parameter}' with type '{declared_type}' is not supported")]
    UnsupportedParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Display form of the parameter's declared type.
        declared_type: String,
    },

    /// A sum type declares no variants at all.
    #[error("sum type '{type_name}' declares no variants")]
    EmptySumType {
        /// Display form of the sum type.
        type_name: String,
    },

    /// No variant of a sum type is eligible under the active policy.
    #[error("sum type '{type_name}' has no variant without type parameters to construct")]
    NoEligibleVariant {
        /// Display form of the sum type.
        type_name: String,
    },

    /// An abstract container interface other than list, map or sequence.
    #[error("generic interfaces are not supported: '{interface}'")]
    UnsupportedContainerInterface {
        /// Display form of the requested interface.
        interface: String,
    },

    /// An enumeration declares no members.
    #[error("enumeration '{type_name}' declares no members")]
    EmptyEnum {
        /// Display form of the enumeration.
        type_name: String,
    },

    /// A composite type was registered without any constructor.
    #[error("type '{type_name}' declares no constructors")]
    NoConstructor {
        /// Display form of the composite type.
        type_name: String,
    },

    /// A container or interface descriptor lacks one of its type arguments.
    #[error("type '{type_name}' has no type argument at position {position}")]
    MissingTypeArgument {
        /// Display form of the container type.
        type_name: String,
        /// Zero-based position of the missing argument.
        position: usize,
    },

    /// A type variable has no binding in the current instantiation.
    #[error("type variable '{variable}' is not bound to a concrete type")]
    UnboundTypeVariable {
        /// Name of the formal type parameter.
        variable: String,
    },

    /// A constructor asked for an argument that was never bound.
    #[error("constructor of '{type_name}' read missing argument '{parameter}'")]
    MissingArgument {
        /// Display form of the type being constructed.
        type_name: String,
        /// Name of the parameter that was read.
        parameter: String,
    },

    /// A bound argument does not have the type the constructor expects.
    #[error("argument '{parameter}' is not a value of type '{expected}'")]
    ArgumentTypeMismatch {
        /// Name of the parameter that was read.
        parameter: String,
        /// Rust type the constructor expected.
        expected: &'static str,
    },

    /// A generated container element does not match the declared element type.
    #[error("container element is not a value of type '{expected}'")]
    ElementTypeMismatch {
        /// Rust type the container expected for its elements.
        expected: &'static str,
    },

    /// The resolved instance does not match the requested Rust type.
    #[error("descriptor '{descriptor}' did not produce a value of type '{expected}'")]
    TypeMismatch {
        /// Rust type requested by the caller.
        expected: &'static str,
        /// Display form of the descriptor that was resolved.
        descriptor: String,
    },

    /// The configuration carries no generator for a recognised kind.
    #[error("no generator registered for {kind}")]
    MissingGenerator {
        /// Human-readable name of the kind.
        kind: String,
    },
}

/// Errors that can occur when loading a [`crate::Policy`] from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The policy file could not be read.
    #[error("failed to read policy file at '{path}': {message}")]
    Io {
        /// Path to the policy file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The policy JSON is malformed.
    #[error("invalid policy JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}
