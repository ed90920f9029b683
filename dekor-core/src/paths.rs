//! Mount-path composition and normalization.

/// Join the global prefix and a controller prefix into a mount path:
/// exactly one leading slash, no trailing slash, no doubled separators.
///
/// `mount_path("api/v1", "users/")` is `"/api/v1/users"`; two empty
/// prefixes compose to `"/"`.
pub fn mount_path(global_prefix: &str, controller_prefix: &str) -> String {
    join(&[global_prefix, controller_prefix])
}

/// Normalize a declared route path for registration. Entries may declare
/// paths with or without a leading slash; an empty path means the mount
/// root.
pub fn route_path(path: &str) -> String {
    join(&[path])
}

fn join(segments: &[&str]) -> String {
    let mut out = String::from("/");
    for segment in segments {
        for part in segment.split('/').filter(|p| !p.is_empty()) {
            if !out.ends_with('/') {
                out.push('/');
            }
            out.push_str(part);
        }
    }
    out
}
