use super::{py_list, py_string, render};
use crate::commands::resolve::ResolvedRequest;

const ROUTE_MODULE: &str = r#"from fastapi import APIRouter

{{router}}


@router.get("/")
async def get_{{name}}():
    return {"message": "Get {{name}}"}


@router.post("/")
async def create_{{name}}():
    return {"message": "Create {{name}}"}


@router.put("/{item_id}")
async def update_{{name}}(item_id: int):
    return {"message": f"Update {{name}} {item_id}"}


@router.delete("/{item_id}")
async def delete_{{name}}(item_id: int):
    return {"message": f"Delete {{name}} {item_id}"}
"#;

/// Render the route module for a resolved request.
///
/// The router line is substituted last so that user-supplied prefix and tag
/// text is never scanned for placeholders.
pub fn route_module(req: &ResolvedRequest) -> String {
    let router = format!(
        "router = APIRouter(prefix={}, tags={})",
        py_string(&req.prefix),
        py_list(&req.tags)
    );
    render(ROUTE_MODULE, &[("name", req.name.as_str()), ("router", router.as_str())])
}
