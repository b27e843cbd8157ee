//! Process-wide defaults
//!
//! Holds the geometry policy that [`CompositeOptions::default`] picks up.
//! It starts as [`GeometryPolicy::Strict`] unless the `BDFONT_GEOMETRY`
//! environment variable says otherwise:
//!
//! ```bash
//! BDFONT_GEOMETRY=clip ./my_app
//! ```
//!
//! Runtime changes via [`set_default_geometry`] win over the environment.
//!
//! [`CompositeOptions::default`]: crate::CompositeOptions

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use crate::GeometryPolicy;

/// Environment variable consulted on first use
pub const GEOMETRY_ENV: &str = "BDFONT_GEOMETRY";

static DEFAULT_GEOMETRY: AtomicU8 = AtomicU8::new(GeometryPolicy::Strict as u8);

static ENV_CHECKED: OnceLock<()> = OnceLock::new();

fn check_env() {
    ENV_CHECKED.get_or_init(|| {
        if let Ok(val) = std::env::var(GEOMETRY_ENV) {
            match val.parse::<GeometryPolicy>() {
                Ok(policy) => {
                    DEFAULT_GEOMETRY.store(policy as u8, Ordering::SeqCst);
                    log::info!("Geometry policy {:?} set via {}", policy, GEOMETRY_ENV);
                },
                Err(_) => {
                    log::warn!("Ignoring {}={:?}: expected strict or clip", GEOMETRY_ENV, val);
                },
            }
        }
    });
}

/// Policy used by freshly defaulted composite options
pub fn default_geometry() -> GeometryPolicy {
    check_env();
    GeometryPolicy::from_u8(DEFAULT_GEOMETRY.load(Ordering::SeqCst))
}

/// Override the default policy for the rest of the process
pub fn set_default_geometry(policy: GeometryPolicy) {
    check_env();
    DEFAULT_GEOMETRY.store(policy as u8, Ordering::SeqCst);
    log::debug!("Default geometry policy set to {:?}", policy);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_back() {
        // Global state: keep every assertion in one test
        let before = default_geometry();

        set_default_geometry(GeometryPolicy::Clip);
        assert_eq!(default_geometry(), GeometryPolicy::Clip);

        set_default_geometry(GeometryPolicy::Strict);
        assert_eq!(default_geometry(), GeometryPolicy::Strict);

        set_default_geometry(before);
    }
}
