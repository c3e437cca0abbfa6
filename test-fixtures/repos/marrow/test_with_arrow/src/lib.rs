// arrow-version:insert: mod arrow_{version} {{ use arrow_array_{version} as arrow_array; include!("tests/arrays.rs"); }}
mod arrow_53 { use arrow_array_53 as arrow_array; include!("tests/arrays.rs"); }
mod arrow_52 { use arrow_array_52 as arrow_array; include!("tests/arrays.rs"); }
