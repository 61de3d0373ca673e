//! Strip-Engine: shader variant stripping for build pipelines
//!
//! The compiler front end hands the build pipeline one mutable variant
//! list per (shader, pass) unit. A [`StripSession`] runs every unit
//! through an ordered chain of [`StripPolicy`] implementations, each of
//! which removes the variants it rejects, and aggregates counters and log
//! records for the session report.
//!
//! Three policies ship with the engine:
//!
//! - [`PathBlacklistPolicy`] - strips shaders by asset path pattern
//! - [`PlatformPolicy`] - strips variants by compiler platform tag
//! - [`VariantWhitelistPolicy`] - strips everything not recorded in a
//!   parsed variant collection (the matcher at the heart of the tool)
//!
//! # Usage
//!
//! ```ignore
//! use strip_engine::{SessionOptions, StripSession, VariantWhitelistPolicy, WhitelistOptions};
//!
//! let whitelist = strip_svc::parse_collection(&text, &[]).unwrap();
//! let policy = VariantWhitelistPolicy::new(whitelist, WhitelistOptions::default());
//!
//! let mut session = StripSession::new(vec![Box::new(policy)], SessionOptions::default());
//! for unit in compiled_units {
//!     session.process(&unit.shader, &unit.pass, &mut unit.variants);
//! }
//! let report = session.finish();
//! println!("{}", report.summary());
//! ```

mod policy;
mod session;
mod shader;
mod stopwatch;

pub use policy::{
    INSTANCING_KEYWORDS, PathBlacklistPolicy, PlatformPolicy, STEREO_KEYWORDS, StripPolicy,
    VariantWhitelistPolicy, WhitelistOptions,
};
pub use session::{SessionOptions, SessionReport, StripSession};
pub use shader::{
    CompiledVariant, MatchMode, NameMatch, PassInfo, ShaderInfo, ShaderResolver,
};
pub use stopwatch::Stopwatch;
