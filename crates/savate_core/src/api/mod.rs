pub mod dashboard_json;

pub use dashboard_json::{
    handle_request_json, DashboardRequest, DashboardRequestType, DashboardResponse,
    DashboardResponseType,
};
