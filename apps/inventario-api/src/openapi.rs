use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Inventario API",
        version = "0.1.0",
        description = "Categorías, marcas y productos de un inventario"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/categorias", api = domain_inventario::categorias::handlers::ApiDoc),
        (path = "/marcas", api = domain_inventario::marcas::handlers::ApiDoc),
        (path = "/productos", api = domain_inventario::productos::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for prefix in ["/categorias", "/marcas", "/productos"] {
            assert!(
                doc.paths.paths.keys().any(|p| p.starts_with(prefix)),
                "missing {prefix}"
            );
        }
        assert!(
            doc.paths
                .paths
                .keys()
                .any(|p| p.ends_with("/actualizar-stock"))
        );
    }
}
