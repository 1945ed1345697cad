use marquee::prelude::*;
use marquee::Dispatch;
use once_cell::sync::Lazy;

static VIEWS: Lazy<Views> = Lazy::new(|| {
    Views::new()
        .append_view_path(ViewRoot::embedded(&[
            ("posts/index.jinja", "{{ count }} posts"),
            ("admin/users/index.json.jinja", "{\"users\": {{ count }}}"),
        ]))
        .with_default_formats(["json"])
});

#[derive(Default)]
struct PostsController {
    state: ControllerState,
}

impl Controller for PostsController {
    const NAME: &'static str = "PostsController";

    fn state(&self) -> &ControllerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }
}

impl Rendering for PostsController {
    fn views(&self) -> &Views {
        &VIEWS
    }

    fn prefix(&self) -> Option<String> {
        Some(Self::controller_path())
    }
}

#[derive(Default)]
struct UsersController {
    state: ControllerState,
}

impl Controller for UsersController {
    const NAME: &'static str = "Admin::UsersController";

    fn state(&self) -> &ControllerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }
}

impl Rendering for UsersController {
    fn views(&self) -> &Views {
        &VIEWS
    }

    fn prefix(&self) -> Option<String> {
        Some(Self::controller_path())
    }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new()
        .controller(
            ControllerClass::<PostsController>::builder()
                .action("index", |c: &mut PostsController| {
                    c.assign("count", 3);
                    c.render(RenderOptions::new())
                })
                .build(),
        )
        .controller(
            ControllerClass::<UsersController>::builder()
                .action("index", |c: &mut UsersController| {
                    c.assign("count", 2);
                    c.render(RenderOptions::new())
                })
                .build(),
        )
}

#[test]
fn controllers_are_keyed_by_controller_path() {
    let dispatcher = dispatcher();
    assert_eq!(dispatcher.controller_paths(), vec!["admin/users", "posts"]);
    assert_eq!(
        dispatcher.get("admin/users").map(|c| c.controller_name()),
        Some("Admin::UsersController")
    );
}

#[test]
fn dispatches_to_the_named_controller() {
    let dispatcher = dispatcher();

    // posts/index has no json variant; the formatless template is used
    let posts = dispatcher.process("posts", "index").unwrap();
    assert_eq!(posts.body(), Some("3 posts"));
    assert_eq!(posts.content_type, None);

    let users = dispatcher.process("admin/users", "index").unwrap();
    assert_eq!(users.body(), Some("{\"users\": 2}"));
    assert_eq!(users.content_type.as_deref(), Some("application/json"));
}

#[test]
fn unknown_controller_is_an_error() {
    let err = dispatcher().process("comments", "index").unwrap_err();
    assert!(matches!(err, DispatchError::ControllerNotFound(ref path) if path == "comments"));
}

#[test]
fn unknown_action_is_an_error() {
    let err = dispatcher().process("posts", "destroy").unwrap_err();
    assert!(err.is_action_not_found());
}

#[test]
fn dispatcher_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatcher>();
    assert_send_sync::<ControllerClass<PostsController>>();
}
