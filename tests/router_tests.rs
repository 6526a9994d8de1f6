use http::Method;
use paramgate::router::{DuplicatePolicy, Router};
use paramgate::spec::{ParameterSpec, RouteDef, SpecError};

fn route(method: Method, pattern: &str, name: &str) -> RouteDef {
    let params = pattern
        .split('/')
        .filter_map(|seg| {
            let inner = seg.strip_prefix('{')?.strip_suffix('}')?;
            let capture = inner.split(':').next().unwrap_or(inner);
            Some(ParameterSpec::path(capture).string().finish().unwrap())
        })
        .collect();
    RouteDef::new(method, pattern, name, params).unwrap()
}

#[test]
fn test_static_route_matches() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/users", "read_users")).unwrap();

    let m = router.route(Method::GET, "/users").unwrap();
    assert_eq!(m.route.name, "read_users");
    assert!(m.path_params.is_empty());

    assert!(router.route(Method::GET, "/user").is_none());
    assert!(router.route(Method::POST, "/users").is_none());
}

#[test]
fn test_root_route() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/", "root")).unwrap();
    assert_eq!(router.route(Method::GET, "/").unwrap().route.name, "root");
}

#[test]
fn test_param_capture() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/items/{item_id}", "read_item")).unwrap();

    let m = router.route(Method::GET, "/items/3").unwrap();
    assert_eq!(m.route.name, "read_item");
    assert_eq!(m.get_path_param("item_id"), Some("3"));

    // A capture never spans segments.
    assert!(router.route(Method::GET, "/items/3/extra").is_none());
}

#[test]
fn test_static_segment_beats_capture_regardless_of_order() {
    for static_first in [true, false] {
        let mut router = Router::new();
        let me = route(Method::GET, "/users/me", "read_current_user");
        let by_id = route(Method::GET, "/users/{user_id}", "read_user");
        if static_first {
            router.add_all([me, by_id]).unwrap();
        } else {
            router.add_all([by_id, me]).unwrap();
        }

        let m = router.route(Method::GET, "/users/me").unwrap();
        assert_eq!(m.route.name, "read_current_user");
        assert!(m.path_params.is_empty());

        let m = router.route(Method::GET, "/users/johndoe").unwrap();
        assert_eq!(m.route.name, "read_user");
        assert_eq!(m.get_path_param("user_id"), Some("johndoe"));
    }
}

#[test]
fn test_backtracks_from_static_prefix_to_capture() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/users/me/items", "my_items")).unwrap();
    router.add(route(Method::GET, "/users/{user_id}", "read_user")).unwrap();

    // "/users/me" reaches the static "me" node, which has no terminal route;
    // the search must fall back to the {user_id} capture.
    let m = router.route(Method::GET, "/users/me").unwrap();
    assert_eq!(m.route.name, "read_user");
    assert_eq!(m.get_path_param("user_id"), Some("me"));
}

#[test]
fn test_multiple_captures() {
    let mut router = Router::new();
    router
        .add(route(Method::GET, "/users/{user_id}/items/{item_id}", "read_user_item"))
        .unwrap();

    let m = router.route(Method::GET, "/users/7/items/abc").unwrap();
    assert_eq!(m.get_path_param("user_id"), Some("7"));
    assert_eq!(m.get_path_param("item_id"), Some("abc"));
}

#[test]
fn test_distinct_capture_names_at_same_position() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/users/{id}/posts", "user_posts")).unwrap();
    router
        .add(route(Method::GET, "/users/{user_id}/comments", "user_comments"))
        .unwrap();

    let m = router.route(Method::GET, "/users/1/posts").unwrap();
    assert_eq!(m.route.name, "user_posts");
    assert_eq!(m.get_path_param("id"), Some("1"));

    let m = router.route(Method::GET, "/users/2/comments").unwrap();
    assert_eq!(m.route.name, "user_comments");
    assert_eq!(m.get_path_param("user_id"), Some("2"));
}

#[test]
fn test_catch_all_captures_remaining_path() {
    let mut router = Router::new();
    router
        .add(route(Method::GET, "/files/{file_path:path}", "read_file"))
        .unwrap();

    let m = router.route(Method::GET, "/files/home/johndoe/notes.txt").unwrap();
    assert_eq!(m.get_path_param("file_path"), Some("home/johndoe/notes.txt"));

    let m = router.route(Method::GET, "/files/notes.txt").unwrap();
    assert_eq!(m.get_path_param("file_path"), Some("notes.txt"));

    // Empty remainder still matches, with an empty capture.
    let m = router.route(Method::GET, "/files").unwrap();
    assert_eq!(m.get_path_param("file_path"), Some(""));
}

#[test]
fn test_static_sibling_beats_catch_all() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/files/latest", "latest_file")).unwrap();
    router
        .add(route(Method::GET, "/files/{file_path:path}", "read_file"))
        .unwrap();

    assert_eq!(
        router.route(Method::GET, "/files/latest").unwrap().route.name,
        "latest_file"
    );
    assert_eq!(
        router.route(Method::GET, "/files/archive/2024").unwrap().route.name,
        "read_file"
    );
}

#[test]
fn test_duplicate_registration_rejected_by_default() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/users", "read_users")).unwrap();
    let err = router.add(route(Method::GET, "/users", "read_users2")).unwrap_err();

    assert!(matches!(
        err,
        SpecError::RouteConflict { existing, .. } if existing == "read_users"
    ));
    assert_eq!(router.len(), 1);
}

#[test]
fn test_duplicate_registration_shadowed_first_wins() {
    let mut router = Router::with_policy(DuplicatePolicy::Shadow);
    router.add(route(Method::GET, "/users", "read_users")).unwrap();
    router.add(route(Method::GET, "/users", "read_users2")).unwrap();

    assert_eq!(router.len(), 1);
    assert_eq!(router.route(Method::GET, "/users").unwrap().route.name, "read_users");
}

#[test]
fn test_same_path_different_methods() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/items", "list_items")).unwrap();
    router.add(route(Method::POST, "/items", "create_item")).unwrap();

    assert_eq!(router.route(Method::GET, "/items").unwrap().route.name, "list_items");
    assert_eq!(router.route(Method::POST, "/items").unwrap().route.name, "create_item");
}

#[test]
fn test_method_falls_back_across_shapes() {
    // A static route for one method must not hide a capture route that
    // serves another method at the same position.
    let mut router = Router::new();
    router.add(route(Method::GET, "/users/me", "read_current_user")).unwrap();
    router.add(route(Method::POST, "/users/{user_id}", "update_user")).unwrap();

    let m = router.route(Method::POST, "/users/me").unwrap();
    assert_eq!(m.route.name, "update_user");
    assert_eq!(m.get_path_param("user_id"), Some("me"));
}

#[test]
fn test_trailing_slash_is_ignored() {
    let mut router = Router::new();
    router.add(route(Method::GET, "/items/{item_id}", "read_item")).unwrap();
    assert!(router.route(Method::GET, "/items/3/").is_some());
}

#[test]
fn test_registration_order_reported() {
    let mut router = Router::new();
    assert!(router.is_empty());
    router.add(route(Method::GET, "/a", "a")).unwrap();
    router.add(route(Method::GET, "/b", "b")).unwrap();
    let names: Vec<&str> = router.routes().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}
