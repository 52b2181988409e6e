#[cfg(test)]
pub mod test {
    use crate::schema::{EnvSchema, Fields};

    crate::env_schema! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct Simple {
            pub str: String => "STR",
            pub int: i64 => "INT",
            pub bol: bool => "BOL",
        }
    }

    /// Declared by hand, with a required key and a field left out.
    #[derive(Debug, Default, PartialEq)]
    pub struct Tagged {
        pub database_url: String,
        pub note: String,
        pub workers: i32,
    }

    impl EnvSchema for Tagged {
        fn declare<'a>(&'a mut self, fields: &mut Fields<'a>) {
            fields
                .field("DATABASE_URL,required", &mut self.database_url)
                .field("", &mut self.note)
                .field("WORKERS,omitempty", &mut self.workers);
        }
    }

    crate::env_schema! {
        #[derive(Debug, Default)]
        pub struct Unsupported {
            pub ratio: f64 => "RATIO",
        }
    }

    #[test]
    fn macro_keeps_plain_struct_shape() {
        let s = Simple {
            str: "a".into(),
            int: 1,
            bol: true,
        };
        assert_eq!(s.clone(), s);
    }
}
