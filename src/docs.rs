use orgdeck_models::{
    AccessGroup, AccessSelection, ActionPermission, BulkUpdateAccessDto, CategoryAccess,
    Permission, PermissionCategory, PermissionChange, Role, RoleAccessMatrix,
    RoleAccessUpdateResponse, UpdateAccessGroupDto,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::roles::controller::get_permissions,
        crate::modules::roles::controller::get_permission_categories,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::get_role_by_id,
        crate::modules::access::controller::get_role_access,
        crate::modules::access::controller::update_category_access,
        crate::modules::access::controller::update_role_access,
    ),
    components(
        schemas(
            Permission,
            PermissionCategory,
            ActionPermission,
            Role,
            AccessGroup,
            CategoryAccess,
            RoleAccessMatrix,
            PermissionChange,
            AccessSelection,
            UpdateAccessGroupDto,
            BulkUpdateAccessDto,
            RoleAccessUpdateResponse,
        )
    ),
    tags(
        (name = "Permissions", description = "Permission catalog"),
        (name = "Roles", description = "Role listing"),
        (name = "Access", description = "Simplified access groups per role and category")
    ),
    info(
        title = "orgdeck API",
        version = "0.1.0",
        description = "Role access matrix for the organisation dashboard.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
