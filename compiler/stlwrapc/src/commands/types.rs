//! `types`: list the registered element types.

use stlwrap_types::{CanonicalType, Registry};

use super::fail;

pub fn list_types() {
    let registry = Registry::builtin();
    println!("{:<12} {:<16} {:<8} storage", "token", "name", "key");
    for (primitive, entry) in registry.primitives() {
        let ty = CanonicalType::Primitive(primitive);
        let key = if ty.is_ordered_key() { "yes" } else { "no" };
        let storage = match registry.storage_type(&ty) {
            Ok(storage) => storage,
            Err(e) => fail(&e),
        };
        println!(
            "{:<12} {:<16} {:<8} {storage}",
            primitive.token(),
            entry.human_name,
            key
        );
    }
    println!();
    println!("Containers: vector<T>, set<K>, map<K, V> (K must be a key type)");
}
