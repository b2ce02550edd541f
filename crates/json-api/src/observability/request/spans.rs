//! HTTP span helpers.

use uuid::Uuid;

/// Replace UUID path segments so request logs group by route.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut template = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            template.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else {
            template.push_str(segment);
        }
    }

    template
}
