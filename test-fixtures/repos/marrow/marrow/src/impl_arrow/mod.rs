// arrow-version:insert: #[cfg(feature = "arrow-{version}")]{\n}mod arrow_{version} {{{\n}    use arrow_array_{version} as arrow_array;{\n}    include!("impl_api_53.rs");{\n}}}
#[cfg(feature = "arrow-53")]
mod arrow_53 {
    use arrow_array_53 as arrow_array;
    include!("impl_api_53.rs");
}

#[cfg(feature = "arrow-52")]
mod arrow_52 {
    use arrow_array_52 as arrow_array;
    include!("impl_api_53.rs");
}
