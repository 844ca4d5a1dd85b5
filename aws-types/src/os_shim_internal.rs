/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Process environment access that tests can replace

use std::collections::HashMap;
use std::env::VarError;
use std::fmt;
use std::sync::Arc;

/// The process environment, or a fixed set of variables standing in for it
///
/// Region and credential providers read configuration through an `Env` so tests never touch the
/// variables of the (shared, multi-threaded) test process. Clones are cheap.
#[derive(Clone)]
pub struct Env {
    vars: Option<Arc<HashMap<String, String>>>,
}

impl Env {
    /// Read from the real process environment
    pub fn real() -> Self {
        Env { vars: None }
    }

    /// A fake environment holding exactly `vars`
    ///
    /// ```rust
    /// use aws_types::os_shim_internal::Env;
    /// let env = Env::from_slice(&[("AWS_REGION", "us-west-2")]);
    /// assert_eq!(env.get("AWS_REGION").unwrap(), "us-west-2");
    /// assert!(env.get("HOME").is_err());
    /// ```
    pub fn from_slice(vars: &[(&str, &str)]) -> Self {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    pub fn get(&self, key: &str) -> Result<String, VarError> {
        match &self.vars {
            None => std::env::var(key),
            Some(vars) => vars.get(key).cloned().ok_or(VarError::NotPresent),
        }
    }

    /// The value of the first of `keys` that is set to something other than whitespace
    pub fn first_set(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.get(key).ok())
            .find(|value| !value.trim().is_empty())
    }
}

impl Default for Env {
    fn default() -> Self {
        Env::real()
    }
}

impl From<HashMap<String, String>> for Env {
    fn from(vars: HashMap<String, String>) -> Self {
        Env {
            vars: Some(Arc::new(vars)),
        }
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // values may be secrets
        match &self.vars {
            None => f.write_str("Env::Real"),
            Some(vars) => write!(f, "Env::Fake({} vars)", vars.len()),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::os_shim_internal::Env;
    use std::env::VarError;

    #[test]
    fn fake_env_only_holds_its_vars() {
        let env = Env::from_slice(&[("AWS_REGION", "eu-central-1")]);
        assert_eq!(env.get("AWS_REGION").unwrap(), "eu-central-1");
        assert_eq!(env.get("PATH"), Err(VarError::NotPresent));
    }

    #[test]
    fn blank_values_are_skipped() {
        let env = Env::from_slice(&[("AWS_REGION", " "), ("AWS_DEFAULT_REGION", "us-east-2")]);
        assert_eq!(
            env.first_set(&["AWS_REGION", "AWS_DEFAULT_REGION"]).as_deref(),
            Some("us-east-2")
        );
        assert_eq!(env.first_set(&["AWS_REGION"]), None);
    }

    #[test]
    fn debug_hides_values() {
        let env = Env::from_slice(&[("AWS_SECRET_ACCESS_KEY", "shh")]);
        assert_eq!(format!("{:?}", env), "Env::Fake(1 vars)");
    }
}
