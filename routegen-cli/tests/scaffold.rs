use routegen_cli::commands::create_route::{self, CreateRouteOpts};
use routegen_cli::commands::resolve::{DefaultsPrompt, ResolvedRequest};
use routegen_cli::commands::scaffold::scaffold;
use routegen_cli::config::{Layout, ScaffoldConfig};
use routegen_cli::ScaffoldError;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FASTAPI_MAIN: &str = "\
from fastapi import APIRouter

from app.api.routes import utils
from app.api.routes import users


api_router = APIRouter()
api_router.include_router(utils.router)
api_router.include_router(users.router)
";

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Lay out `app/api/routes/` and `app/api/main.py` under a fresh temp dir.
fn project(aggregator: &str) -> (TempDir, ScaffoldConfig) {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("app/api/routes")).unwrap();
    fs::write(tmp.path().join("app/api/main.py"), aggregator).unwrap();
    let config = ScaffoldConfig::new(tmp.path(), Layout::default());
    (tmp, config)
}

fn request(name: &str) -> ResolvedRequest {
    ResolvedRequest {
        name: name.into(),
        prefix: format!("/{name}"),
        tags: vec![name.into()],
    }
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

// ── end to end ──────────────────────────────────────────────────────

#[test]
fn scaffold_creates_module_and_registers_it() {
    let (tmp, config) = project("api_router = APIRouter()\n");

    let report = scaffold(&request("posts"), &config).unwrap();

    let route_file = tmp.path().join("app/api/routes/posts.py");
    assert_eq!(report.route_file, route_file);
    assert!(report.import_added);
    assert!(report.registration_added);

    let module = read(&route_file);
    assert!(module.contains(r#"APIRouter(prefix="/posts", tags=["posts"])"#));
    for handler in ["get_posts", "create_posts", "update_posts", "delete_posts"] {
        assert!(module.contains(&format!("async def {handler}(")));
    }

    let main = read(tmp.path().join("app/api/main.py"));
    assert_eq!(main.matches("from app.api.routes import posts").count(), 1);
    assert_eq!(
        main.matches("api_router.include_router(posts.router)").count(),
        1
    );
    assert!(main.starts_with("api_router = APIRouter()\n"));
}

#[test]
fn scaffold_against_fastapi_aggregator() {
    let (tmp, config) = project(FASTAPI_MAIN);

    scaffold(&request("posts"), &config).unwrap();

    let main = read(tmp.path().join("app/api/main.py"));
    assert_eq!(
        main,
        "\
from fastapi import APIRouter

from app.api.routes import utils
from app.api.routes import users
from app.api.routes import posts


api_router = APIRouter()
api_router.include_router(utils.router)
api_router.include_router(users.router)
api_router.include_router(posts.router)
"
    );
}

// ── conflicts ───────────────────────────────────────────────────────

#[test]
fn second_scaffold_conflicts_and_leaves_aggregator_alone() {
    let (tmp, config) = project(FASTAPI_MAIN);
    scaffold(&request("posts"), &config).unwrap();
    let main_after_first = read(tmp.path().join("app/api/main.py"));
    let module_after_first = read(tmp.path().join("app/api/routes/posts.py"));

    let mut second = request("posts");
    second.prefix = "/other".into();
    let result = scaffold(&second, &config);

    match result {
        Err(ScaffoldError::Conflict { name, .. }) => assert_eq!(name, "posts"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(read(tmp.path().join("app/api/main.py")), main_after_first);
    assert_eq!(read(tmp.path().join("app/api/routes/posts.py")), module_after_first);
}

#[test]
fn existing_module_file_is_never_overwritten() {
    let (tmp, config) = project(FASTAPI_MAIN);
    let route_file = tmp.path().join("app/api/routes/users.py");
    fs::write(&route_file, "# hand written\n").unwrap();

    let result = scaffold(&request("users"), &config);

    assert!(matches!(result, Err(ScaffoldError::Conflict { .. })));
    assert!(result.unwrap_err().to_string().contains("already exists"));
    assert_eq!(read(&route_file), "# hand written\n");
    assert_eq!(read(tmp.path().join("app/api/main.py")), FASTAPI_MAIN);
}

// ── idempotent patching ─────────────────────────────────────────────

#[test]
fn preexisting_lines_for_other_route_survive() {
    let source = "\
from fastapi import APIRouter
from app.api.routes import x

api_router = APIRouter()
api_router.include_router(x.router)
";
    let (tmp, config) = project(source);

    scaffold(&request("y"), &config).unwrap();

    let main = read(tmp.path().join("app/api/main.py"));
    assert_eq!(main.matches("from app.api.routes import x").count(), 1);
    assert_eq!(main.matches("api_router.include_router(x.router)").count(), 1);
    assert_eq!(main.matches("from app.api.routes import y").count(), 1);
    assert_eq!(main.matches("api_router.include_router(y.router)").count(), 1);
    assert_eq!(main.lines().count(), source.lines().count() + 2);
}

#[test]
fn already_registered_route_only_gets_module() {
    let source = "from app.api.routes import y\napi_router.include_router(y.router)\n";
    let (tmp, config) = project(source);

    let report = scaffold(&request("y"), &config).unwrap();

    assert!(!report.import_added);
    assert!(!report.registration_added);
    assert!(tmp.path().join("app/api/routes/y.py").exists());
    assert_eq!(read(tmp.path().join("app/api/main.py")), source);
}

// ── failures ────────────────────────────────────────────────────────

#[test]
fn invalid_request_touches_nothing() {
    let (tmp, config) = project(FASTAPI_MAIN);

    let result = scaffold(&request("bad name"), &config);

    assert!(matches!(result, Err(ScaffoldError::Validation(_))));
    assert_eq!(fs::read_dir(tmp.path().join("app/api/routes")).unwrap().count(), 0);
    assert_eq!(read(tmp.path().join("app/api/main.py")), FASTAPI_MAIN);
}

#[test]
fn missing_aggregator_fails_without_orphan_module() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("app/api/routes")).unwrap();
    let config = ScaffoldConfig::new(tmp.path(), Layout::default());

    let result = scaffold(&request("posts"), &config);

    match result {
        Err(ScaffoldError::Io { path, .. }) => assert!(path.ends_with("app/api/main.py")),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(!tmp.path().join("app/api/routes/posts.py").exists());
}

#[test]
fn missing_routes_dir_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("app/api")).unwrap();
    fs::write(tmp.path().join("app/api/main.py"), FASTAPI_MAIN).unwrap();
    let config = ScaffoldConfig::new(tmp.path(), Layout::default());

    let result = scaffold(&request("posts"), &config);

    assert!(matches!(result, Err(ScaffoldError::Io { .. })));
    assert_eq!(read(tmp.path().join("app/api/main.py")), FASTAPI_MAIN);
}

// ── custom layout ───────────────────────────────────────────────────

#[test]
fn custom_layout_is_honoured() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("svc/endpoints")).unwrap();
    fs::write(tmp.path().join("svc/router.py"), "root = APIRouter()\n").unwrap();
    let layout = Layout {
        routes_dir: "svc/endpoints".into(),
        aggregator: "svc/router.py".into(),
        namespace: "svc.endpoints".into(),
        router_var: "root".into(),
        extension: "py".into(),
    };
    let config = ScaffoldConfig::new(tmp.path(), layout);

    scaffold(&request("orders"), &config).unwrap();

    assert!(tmp.path().join("svc/endpoints/orders.py").exists());
    assert_eq!(
        read(tmp.path().join("svc/router.py")),
        "root = APIRouter()\nfrom svc.endpoints import orders\nroot.include_router(orders.router)\n"
    );
}

// ── command ─────────────────────────────────────────────────────────

#[test]
fn create_route_command_uses_defaults_without_interaction() {
    let (tmp, config) = project(FASTAPI_MAIN);
    let opts = CreateRouteOpts {
        name: Some("widgets".into()),
        ..CreateRouteOpts::default()
    };

    let report = create_route::run_with(opts, &config, &mut DefaultsPrompt).unwrap();

    assert!(report.import_added && report.registration_added);
    let module = read(tmp.path().join("app/api/routes/widgets.py"));
    assert!(module.contains(r#"APIRouter(prefix="/widgets", tags=["widgets"])"#));
}

#[test]
fn create_route_command_rejects_invalid_name_before_io() {
    let (tmp, _config) = project(FASTAPI_MAIN);
    let opts = CreateRouteOpts {
        name: Some("2bad".into()),
        no_interactive: true,
        ..CreateRouteOpts::default()
    };

    let result = create_route::run(opts, Some(tmp.path()), None);

    assert!(matches!(result, Err(ScaffoldError::Validation(_))));
    assert_eq!(read(tmp.path().join("app/api/main.py")), FASTAPI_MAIN);
}

#[test]
#[serial]
fn invalid_name_reported_even_outside_a_project() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    let opts = CreateRouteOpts {
        name: Some("2bad".into()),
        no_interactive: true,
        ..CreateRouteOpts::default()
    };

    let result = create_route::run(opts, None, None);

    match result {
        Err(ScaffoldError::Validation(msg)) => assert!(msg.contains("valid identifier")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn valid_name_outside_a_project_reports_missing_root() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    let opts = CreateRouteOpts {
        name: Some("posts".into()),
        no_interactive: true,
        ..CreateRouteOpts::default()
    };

    let result = create_route::run(opts, None, None);

    assert!(matches!(result, Err(ScaffoldError::ProjectRootNotFound(_))));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
#[serial]
fn create_route_command_discovers_root_from_cwd() {
    let (tmp, _config) = project(FASTAPI_MAIN);
    let _cwd = CwdGuard::new(&tmp.path().join("app/api/routes"));
    let opts = CreateRouteOpts {
        name: Some("posts".into()),
        no_interactive: true,
        ..CreateRouteOpts::default()
    };

    create_route::run(opts, None, None).unwrap();

    assert!(tmp.path().join("app/api/routes/posts.py").exists());
    let main = read(tmp.path().join("app/api/main.py"));
    assert_eq!(main.matches("api_router.include_router(posts.router)").count(), 1);
}
