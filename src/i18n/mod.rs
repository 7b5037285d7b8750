//! Language identity and source-language policy.
//!
//! # Architecture
//!
//! - `language`: opaque, normalised `Language` codes
//! - `registry`: display metadata for well-known languages
//! - `scope`: `LanguageSupportScope`, the policy for detected source languages
//!
//! # Example
//!
//! ```
//! use local_translator::i18n::{Language, LanguageSupportScope};
//!
//! let scope = LanguageSupportScope::restricted_to([Language::ENGLISH, Language::JAPANESE]);
//! assert!(scope.allows(&Language::from_code("ja").unwrap()));
//! assert!(!scope.allows(&Language::FRENCH));
//! ```

mod language;
mod registry;
mod scope;

pub use language::{Language, LanguageError, UNDETERMINED_CODE};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use scope::LanguageSupportScope;
