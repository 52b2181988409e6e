//! Configuration record for the envsec demo application.
//!
//! | Key                 | Type   | Notes                                   |
//! |---------------------|--------|-----------------------------------------|
//! | `DEMO_NAME`         | string | banner name                             |
//! | `DEMO_DATABASE_URL` | string | required                                |
//! | `DEMO_PASSWORD`     | string | usually supplied via `__SECRET`         |
//! | `DEMO_PORT`         | int    |                                         |
//! | `DEMO_VERBOSE`      | bool   |                                         |
//!
//! Each key also accepts `KEY__FILE` and `KEY__SECRET`.

envsec::env_schema! {
    /// Root configuration for the demo application.
    #[derive(Debug)]
    pub struct DemoConfig {
        /// Name shown in the banner.
        pub name: String => "DEMO_NAME",

        /// Database connection string.
        pub database_url: String => "DEMO_DATABASE_URL,required",

        /// Database password. Never printed.
        pub password: String => "DEMO_PASSWORD",

        /// Port to listen on.
        pub port: i64 => "DEMO_PORT",

        /// Enable verbose output.
        pub verbose: bool => "DEMO_VERBOSE",

        /// Set by the application, not read from the environment.
        pub loaded: bool,
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            name: "envsec-demo".into(),
            database_url: String::new(),
            password: String::new(),
            port: 3000,
            verbose: false,
            loaded: false,
        }
    }
}
