//! Eauth backends and execution clients

use crate::impl_wire_name_conversions;

/// External authentication backend used at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthModule {
    /// Let the master pick the backend.
    #[default]
    Auto,
    Pam,
    Ldap,
    Django,
    Keystone,
    Mysql,
    Yubico,
    SharedSecret,
    Rest,
}

impl_wire_name_conversions!(AuthModule {
    Auto => "auto",
    Pam => "pam",
    Ldap => "ldap",
    Django => "django",
    Keystone => "keystone",
    Mysql => "mysql",
    Yubico => "yubico",
    SharedSecret => "sharedsecret",
    Rest => "rest",
});

/// Salt client interface a `/run` lowstate chunk is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientKind {
    #[default]
    Local,
    LocalAsync,
    LocalBatch,
    Runner,
    RunnerAsync,
    Wheel,
    WheelAsync,
}

impl_wire_name_conversions!(ClientKind {
    Local => "local",
    LocalAsync => "local_async",
    LocalBatch => "local_batch",
    Runner => "runner",
    RunnerAsync => "runner_async",
    Wheel => "wheel",
    WheelAsync => "wheel_async",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_module_defaults_to_auto() {
        assert_eq!(AuthModule::default(), AuthModule::Auto);
        assert_eq!(AuthModule::default().as_str(), "auto");
    }

    #[test]
    fn client_kind_names_match_salt() {
        assert_eq!(ClientKind::LocalAsync.to_string(), "local_async");
        assert_eq!("runner_async".parse::<ClientKind>().unwrap(), ClientKind::RunnerAsync);
        assert_eq!(serde_json::to_value(ClientKind::Wheel).unwrap(), "wheel");
    }
}
