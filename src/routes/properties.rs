use crate::domain::PropertyId;
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use crate::router::parse_query;
use crate::search::{FilterCriteria, PageRequest};
use crate::state::AppState;
use astra::Request;

/// GET /api/properties
pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let criteria = FilterCriteria::from_params(&params);
    let page = PageRequest::from_params(&params);

    let result = state.dispatcher().search(&criteria, page)?;
    json_response(200, &result)
}

/// GET /api/properties/{id}
pub fn get(raw_id: &str, state: &AppState) -> ResultResp {
    let not_found = || ServerError::NotFound("Property not found".into());

    let id = PropertyId::parse(raw_id).ok_or_else(not_found)?;
    let property = state.dispatcher().find(&id)?.ok_or_else(not_found)?;
    json_response(200, &property)
}
