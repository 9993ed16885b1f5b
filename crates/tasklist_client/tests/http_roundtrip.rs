//! End-to-end: `HttpTaskApi` against the real router on an ephemeral port.

use tasklist_client::{ApiError, HttpTaskApi, TaskApi, TaskListController};
use tasklist_core::db::open_db_in_memory;
use tasklist_server::{build_router, serve, AppState, CorsOrigin};
use tokio::net::TcpListener;
use uuid::Uuid;

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(
        AppState::new(open_db_in_memory().unwrap()),
        &CorsOrigin::Any,
    );
    tokio::spawn(serve(listener, router, std::future::pending()));
    format!("http://{addr}/")
}

#[tokio::test]
async fn api_scenario_over_http() {
    let api = HttpTaskApi::new(spawn_server().await);
    assert!(!api.base_url().ends_with('/'));

    let created = api.create_task("Buy milk").await.unwrap();
    assert_eq!(created.text, "Buy milk");
    assert!(!created.completed);
    assert_eq!(api.list_tasks().await.unwrap(), vec![created.clone()]);

    let toggled = api.set_completed(created.id, true).await.unwrap();
    assert!(toggled.completed);

    let edited = api.update_text(created.id, "Buy oat milk").await.unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.text, "Buy oat milk");
    assert!(edited.completed);

    api.delete_task(created.id).await.unwrap();
    api.delete_task(created.id).await.unwrap();
    assert!(api.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_statuses_surface_as_api_errors() {
    let api = HttpTaskApi::new(spawn_server().await);

    let missing = api.set_completed(Uuid::new_v4(), true).await.unwrap_err();
    assert!(matches!(missing, ApiError::NotFound(_)));

    match api.create_task("   ").await.unwrap_err() {
        ApiError::Status { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("VALIDATION_ERROR"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn controller_drives_real_service() {
    let mut controller = TaskListController::new(HttpTaskApi::new(spawn_server().await));
    controller.load().await.unwrap();
    assert!(controller.state().tasks.is_empty());

    controller.set_input("Walk dog");
    controller.add().await.unwrap();
    let id = controller.state().tasks.get_row(1).unwrap().id;
    controller.toggle(id).await.unwrap();

    let mut reloaded = TaskListController::new(HttpTaskApi::new(controller_base(&controller)));
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.state().tasks, controller.state().tasks);
}

fn controller_base(controller: &TaskListController<HttpTaskApi>) -> String {
    controller.api().base_url().to_string()
}
