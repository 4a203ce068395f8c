use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};

/// `https://<host>`, or an empty string for an empty host
pub fn https(host: &str) -> String {
    if host.is_empty() {
        return String::new();
    }
    format!("https://{}", host)
}

/// Controller reference to `owner`. Unlike `Resource::controller_owner_ref` it does not require
/// the owner to carry a uid yet.
pub fn owner_ref_from<K: Resource<DynamicType = ()>>(owner: &K) -> OwnerReference {
    OwnerReference {
        api_version: K::api_version(&()).to_string(),
        kind: K::kind(&()).to_string(),
        name: owner.name_any(),
        uid: owner.meta().uid.to_owned().unwrap_or_default(),
        controller: Some(true),
        ..OwnerReference::default()
    }
}

/// Appends `owner_ref` unless an equivalent reference is already present
pub fn add_owner_ref<K: Resource>(resource: &mut K, owner_ref: OwnerReference) {
    let owner_references = resource.meta_mut().owner_references.get_or_insert_with(Vec::new);
    let already_owned = owner_references.iter().any(|existing| {
        existing.api_version == owner_ref.api_version && existing.kind == owner_ref.kind && existing.name == owner_ref.name && existing.uid == owner_ref.uid
    });
    if !already_owned {
        owner_references.push(owner_ref);
    }
}
