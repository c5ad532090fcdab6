//! Serialize-then-reload idempotence for the effective settings record.
//!
//! Loading applies validation and host defaults; serializing the result and
//! loading it again must be the identity. This pins down both the serde
//! attributes on the schema and the idempotence of default application.

use proptest::prelude::*;

use weft_settings::settings::loader::SettingsLoader;
use weft_settings::settings::schema::{
    AdminAuth, AdminRoot, AuthType, ConsoleSink, ContextStorage, ContextStore, LogLevel,
    LoggingSettings, Settings, StoreTarget, UserCredential,
};

const SAMPLE_HASHES: &[&str] = &[
    "$2b$08$K6mZqjVdXNqhJ3pZ9cQ1uO",
    "$2a$10$N9qo8uLOickgx2ZMRZoMye",
    "$2y$12$R9h/cIPz0gi.URNNX3kh2O",
];

fn arb_user(username: String) -> impl Strategy<Value = UserCredential> {
    (
        prop::sample::select(SAMPLE_HASHES),
        prop::sample::select(&["*", "read", "write"][..]),
    )
        .prop_map(move |(password, permissions)| UserCredential {
            username: username.clone(),
            password: password.to_string(),
            permissions: permissions.to_string(),
        })
}

fn arb_admin_auth() -> impl Strategy<Value = AdminAuth> {
    // Usernames come from a set so they are unique, as validation requires
    prop::collection::btree_set("[a-z]{1,8}", 1..4)
        .prop_flat_map(|names| {
            names
                .into_iter()
                .map(arb_user)
                .collect::<Vec<_>>()
                .prop_map(|users| AdminAuth {
                    auth_type: AuthType::Credentials,
                    users,
                })
        })
}

fn arb_admin_root() -> impl Strategy<Value = AdminRoot> {
    prop_oneof![
        Just(AdminRoot::Flag(false)),
        "(/[a-z]{1,6}){1,2}".prop_map(AdminRoot::Path),
    ]
}

fn arb_logging() -> impl Strategy<Value = LoggingSettings> {
    (
        prop::option::of(prop::sample::select(&[
            LogLevel::Fatal,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ][..])),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(level, metrics, audit)| LoggingSettings {
            console: Some(ConsoleSink {
                level,
                metrics,
                audit,
            }),
        })
}

fn arb_context_storage() -> impl Strategy<Value = ContextStorage> {
    prop::sample::select(&["memory", "localfilesystem"][..]).prop_map(|module| ContextStorage {
        default: Some(StoreTarget::Store(ContextStore {
            module: module.to_string(),
            config: None,
        })),
        stores: std::collections::BTreeMap::new(),
    })
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        prop::option::of(arb_admin_auth()),
        prop::option::of(arb_admin_root()),
        prop::option::of(arb_logging()),
        prop::option::of(arb_context_storage()),
    )
        .prop_map(|(admin_auth, http_admin_root, logging, context_storage)| Settings {
            admin_auth,
            editor_theme: None,
            http_admin_root,
            http_node_auth: None,
            context_storage,
            logging,
        })
}

proptest! {
    #[test]
    fn effective_record_roundtrips(settings in arb_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let loader = SettingsLoader::with_defaults();

        let first_path = dir.path().join("settings.yaml");
        std::fs::write(&first_path, serde_yaml::to_string(&settings).unwrap()).unwrap();
        let first = loader.load(&first_path).unwrap();

        let second_path = dir.path().join("reloaded.yaml");
        std::fs::write(&second_path, serde_yaml::to_string(&*first.settings).unwrap()).unwrap();
        let second = loader.load(&second_path).unwrap();

        prop_assert_eq!(&*first.settings, &*second.settings);
    }

    #[test]
    fn loading_is_deterministic(settings in arb_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let loader = SettingsLoader::with_defaults();

        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, serde_yaml::to_string(&settings).unwrap()).unwrap();

        let first = loader.load(&path).unwrap();
        let second = loader.load(&path).unwrap();
        prop_assert_eq!(&*first.settings, &*second.settings);
    }
}
