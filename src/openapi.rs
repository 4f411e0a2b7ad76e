//! OpenAPI document for the public routes.

use crate::campaign::Campaign;
use crate::routes::common::RootBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campaign Management API",
        description = "API for managing marketing campaigns with PostgreSQL",
        version = "1.0.0"
    ),
    paths(crate::routes::common::root, crate::handlers::campaign::list_campaigns),
    components(schemas(Campaign, RootBody))
)]
pub struct ApiDoc;
