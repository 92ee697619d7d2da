use chrono::NaiveDate;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub status: u16,
    /// `Validation Error`, `Bad Request`, `Not Found`, `Conflict`, `Cannot Delete` or `Internal Server Error`
    pub error: String,
    pub message: String,
    pub path: String,
}

#[derive(ToSchema)]
pub struct BankDoc { pub id: i32, pub name: String, pub bik: String }

#[derive(ToSchema)]
pub struct BankRequestDoc {
    /// Non-blank, at most 255 characters, unique
    pub name: String,
    /// Exactly 9 digits, unique
    #[schema(example = "044525225")]
    pub bik: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ClientDoc {
    pub id: i32,
    pub name: String,
    pub short_name: Option<String>,
    pub address: Option<String>,
    /// Display label, e.g. `ООО`
    pub legal_form: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ClientRequestDoc {
    pub name: String,
    pub short_name: Option<String>,
    pub address: Option<String>,
    /// Code (`OOO`, `AO`, `PT`, `KT`, `PK`, `IP`, `PAO`, `GUP`, `MUP`) or its label
    #[schema(example = "OOO")]
    pub legal_form: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DepositDoc {
    pub id: i32,
    pub client: ClientDoc,
    pub bank: BankDoc,
    pub opening_date: NaiveDate,
    pub percentage: f64,
    pub term_months: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DepositRequestDoc {
    pub client_id: i32,
    pub bank_id: i32,
    /// Today or earlier. Ignored on create, where today is used.
    pub opening_date: NaiveDate,
    /// Greater than 0
    pub percentage: f64,
    /// 1 to 300
    pub term_months: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::banks::list,
        crate::routes::banks::get,
        crate::routes::banks::create,
        crate::routes::banks::update,
        crate::routes::banks::delete,
        crate::routes::clients::list,
        crate::routes::clients::get,
        crate::routes::clients::create,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::deposits::list,
        crate::routes::deposits::get,
        crate::routes::deposits::create,
        crate::routes::deposits::update,
        crate::routes::deposits::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            BankDoc,
            BankRequestDoc,
            ClientDoc,
            ClientRequestDoc,
            DepositDoc,
            DepositRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "banks"),
        (name = "clients"),
        (name = "deposits")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/api/banks", "/api/banks/{id}", "/api/clients", "/api/clients/{id}", "/api/deposits", "/api/deposits/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
