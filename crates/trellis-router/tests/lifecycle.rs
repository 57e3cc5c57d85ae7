mod common;

use std::time::Duration;

use common::{router, sleep_pre, text, with_children, Events};
use tokio::time::{sleep, Instant};
use trellis_router::prelude::*;
use trellis_router::GateState;

const PRE_TIMEOUT: u64 = 1000;

#[tokio::test(start_paused = true)]
async fn test_waits_for_pre_before_rendering() {
    let mut router = router(vec![Route::new("/root")
        .pre(sleep_pre(PRE_TIMEOUT))
        .component(text("Root route"))]);
    let start = Instant::now();

    assert_eq!(router.navigate("/root").unwrap(), "");
    assert_eq!(router.pending(), 1);

    sleep(Duration::from_millis(PRE_TIMEOUT / 2)).await;
    assert_eq!(router.view().unwrap(), "");

    let view = router.settle_next().await.unwrap().cloned();
    assert_eq!(view.as_deref(), Some("Root route"));
    assert_eq!(start.elapsed(), Duration::from_millis(PRE_TIMEOUT));
    assert_eq!(router.route_state("/root"), Some(GateState::Resolved));
}

#[tokio::test(start_paused = true)]
async fn test_renders_fallback_while_pre_is_pending() {
    let mut router = router(vec![Route::new("/root")
        .pre(sleep_pre(PRE_TIMEOUT))
        .fallback(text("Fallback"))
        .component(text("Root route"))]);

    assert_eq!(router.navigate("/root").unwrap(), "Fallback");
    assert_eq!(router.route_state("/root"), Some(GateState::PrePending));

    sleep(Duration::from_millis(PRE_TIMEOUT / 2)).await;
    assert_eq!(router.view().unwrap(), "Fallback");

    router.settle_all().await.unwrap();
    assert_eq!(router.view().unwrap(), "Root route");
}

#[tokio::test(start_paused = true)]
async fn test_wraps_fallback_with_component_and_defers_children() {
    let mut router = router(vec![Route::new("/root")
        .pre(sleep_pre(PRE_TIMEOUT))
        .component(with_children("Root route"))
        .fallback(text("Fallback"))
        .wrap_fallback_with_component(true)
        .child(Route::new("/sub").component(text("Sub route")))]);

    assert_eq!(
        router.navigate("/root/sub").unwrap(),
        "<div><div>Root route</div><div>Fallback</div></div>"
    );

    sleep(Duration::from_millis(PRE_TIMEOUT / 2)).await;
    assert!(!router.view().unwrap().contains("Sub route"));

    router.settle_all().await.unwrap();
    assert_eq!(
        router.view().unwrap(),
        "<div><div>Root route</div><div>Sub route</div></div>"
    );
}

#[tokio::test(start_paused = true)]
async fn test_mount_runs_after_pre_and_before_content() {
    let events = Events::default();
    let (on_mount, on_unmount, on_render) = (events.clone(), events.clone(), events.clone());

    let mut router = router(vec![
        Route::new("/gated")
            .pre(sleep_pre(PRE_TIMEOUT))
            .on_mount(move |props| on_mount.push(format!("mount {}", props.location.pathname)))
            .on_unmount(move |props| {
                on_unmount.push(format!("unmount {}", props.location.pathname))
            })
            .component(move |_: &RenderProps, _: Option<String>| {
                on_render.push("render");
                "Gated".to_string()
            }),
        Route::new("/open").component(text("Open")),
    ]);

    router.navigate("/gated").unwrap();
    assert!(events.take().is_empty());

    router.settle_next().await.unwrap();
    assert_eq!(events.take(), vec!["mount /gated", "render"]);

    router.navigate("/gated").unwrap();
    assert_eq!(events.take(), vec!["render"]);

    router.navigate("/open").unwrap();
    assert_eq!(events.take(), vec!["unmount /gated"]);
}

#[tokio::test(start_paused = true)]
async fn test_pre_of_unmounted_route_is_ignored() {
    let events = Events::default();
    let mounted = events.clone();

    let mut router = router(vec![
        Route::new("/slow")
            .pre(sleep_pre(PRE_TIMEOUT))
            .on_mount(move |_| mounted.push("mount"))
            .component(text("Slow")),
        Route::new("/fast").component(text("Fast")),
    ]);

    router.navigate("/slow").unwrap();
    assert_eq!(router.navigate("/fast").unwrap(), "Fast");
    assert_eq!(router.route_state("/slow"), None);

    assert_eq!(router.settle_next().await.unwrap(), None);
    assert!(events.take().is_empty());
    assert_eq!(router.view().unwrap(), "Fast");
}

#[tokio::test(start_paused = true)]
async fn test_mount_without_pre_is_immediate() {
    let events = Events::default();
    let mounted = events.clone();

    let mut router = router(vec![Route::new("/a")
        .on_mount(move |props| mounted.push(format!("mount {}", props.route.full_path)))
        .component(text("A"))]);

    assert_eq!(router.navigate("/a").unwrap(), "A");
    assert_eq!(router.pending(), 0);
    assert_eq!(events.take(), vec!["mount /a"]);
}

#[tokio::test(start_paused = true)]
async fn test_pre_receives_render_props() {
    let events = Events::default();
    let seen = events.clone();

    let mut router = router(vec![Route::new("/user/:id")
        .pre(move |props: std::sync::Arc<RenderProps>| {
            seen.push(format!("pre {}", props.param("id").unwrap_or_default()));
            async {}
        })
        .component(text("User"))]);

    assert_eq!(router.navigate("/user/7").unwrap(), "");
    assert_eq!(events.take(), vec!["pre 7"]);

    router.settle_all().await.unwrap();
    assert_eq!(router.view().unwrap(), "User");
}

#[tokio::test(start_paused = true)]
async fn test_unmount_tears_down_mounted_routes() {
    let events = Events::default();
    let unmounted = events.clone();

    let mut router = router(vec![Route::new("/a")
        .on_unmount(move |_| unmounted.push("unmount"))
        .component(text("A"))]);

    router.navigate("/a").unwrap();
    router.unmount();

    assert_eq!(events.take(), vec!["unmount"]);
    assert!(router.view().is_none());
    assert_eq!(router.route_state("/a"), None);
}

#[tokio::test(start_paused = true)]
async fn test_redirect_away_unmounts_route() {
    let events = Events::default();
    let (mounted, unmounted) = (events.clone(), events.clone());

    let mut router = router(vec![
        Route::new("/area")
            .on_mount(move |props| mounted.push(format!("mount {}", props.location.pathname)))
            .on_unmount(move |_| unmounted.push("unmount"))
            .component(with_children("Area"))
            .child(Route::new("/inside").component(text("Inside")))
            .child(Route::redirect("/elsewhere")),
        Route::new("/elsewhere").component(text("Elsewhere")),
    ]);

    assert_eq!(
        router.navigate("/area/inside").unwrap(),
        "<div><div>Area</div><div>Inside</div></div>"
    );
    events.take();

    assert_eq!(router.navigate("/area/unknown").unwrap(), "Elsewhere");
    assert_eq!(router.location().pathname, "/elsewhere");
    assert_eq!(events.take(), vec!["unmount"]);
}
