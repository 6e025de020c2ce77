use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
    service::Service,
    Method, Request, Response, StatusCode, Uri,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};
use url_escape::decode;

use std::{collections::HashMap, future::Future, pin::Pin};

use crate::{restaurants::store::ScheduleStore, ISO_FORMAT, ISO_FORMAT_DATE};

use super::response::{OpenRestaurantsResponse, ScheduleResponse};

/// Accepted layouts for the `datetime_str` parameter, all without a zone.
/// A bare date is also accepted and read as midnight.
const DATETIME_FORMATS: [&str; 4] = [
    ISO_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// The Server
///
/// Answers the query endpoints from the schedule collection currently held by
/// the `ScheduleStore`. Every request reads one snapshot, a reload happening
/// in the meantime does not affect it.
///
/// This struct implements the `Service` trait from `hyper`, a clone is handed to
/// every connection.
#[derive(Clone)]
pub struct Server {
    store: ScheduleStore,
    allow_origin: HeaderValue,
}

impl Server {
    pub fn setup(store: ScheduleStore, allow_origin: &str) -> Result<Self, String> {
        let allow_origin = HeaderValue::from_str(allow_origin)
            .map_err(|err| format!("Invalid allow_origin '{}'.\n{}", allow_origin, err))?;
        Ok(Self {
            store,
            allow_origin,
        })
    }

    /// Parses the query parameters and returns a `hashmap` of key pair values
    /// Returns `None` if the parameters are malformed
    fn parse_params(text: &str) -> Option<HashMap<String, String>> {
        let mut map: HashMap<String, String> = HashMap::new();
        for pairs in text.split('&') {
            let (key, value) = pairs.split_once('=')?;
            // Form encoding sends spaces as `+`
            let key = key.replace('+', " ");
            let value = value.replace('+', " ");
            map.insert(decode(&key).to_string(), decode(&value).to_string());
        }
        Some(map)
    }

    fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, ISO_FORMAT_DATE)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    /// The /open_restaurants API endpoint.
    ///
    /// Takes a `datetime_str` in ISO 8601 without a zone, e.g. `2024-12-13T13:30:00`,
    /// and lists every restaurant open at that moment.
    fn open_restaurants(&self, uri: &Uri) -> Response<Full<Bytes>> {
        let Some(params) = uri.query() else {
            return self.bad_request("Parameters not provided. Required datetime_str.");
        };

        let Some(map) = Self::parse_params(params) else {
            return self.bad_request("Malformed Parameters.");
        };

        let Some(datetime) = map.get("datetime_str") else {
            return self.bad_request("datetime_str not provided.");
        };

        let Some(datetime) = Self::parse_datetime(datetime) else {
            return self.bad_request(
                "Invalid datetime format. Please use ISO 8601 (e.g. 2024-12-13T13:30:00)",
            );
        };

        let open = self.store.snapshot().query_open_at(&datetime);
        debug!("{} restaurants open at {}", open.len(), datetime);
        self.ok_data(OpenRestaurantsResponse::new(open))
    }

    /// The /restaurants API endpoint.
    ///
    /// Returns the normalized week of the restaurant called `name`.
    fn restaurant_schedule(&self, uri: &Uri) -> Response<Full<Bytes>> {
        let Some(params) = uri.query() else {
            return self.bad_request("Parameters not provided. Required name.");
        };

        let Some(map) = Self::parse_params(params) else {
            return self.bad_request("Malformed Parameters.");
        };

        let Some(name) = map.get("name") else {
            return self.bad_request("name not provided.");
        };

        let restaurants = self.store.snapshot();
        match restaurants.get(name) {
            Some(schedule) => self.ok_data(ScheduleResponse::new(name, schedule)),
            None => self.not_found(&format!("Unknown restaurant '{}'", name)),
        }
    }

    fn respond(&self, status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
        let mut res = Response::new(Full::new(body));
        *res.status_mut() = status;
        let headers = res.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        res
    }

    fn error_body(message: &str) -> Bytes {
        Bytes::from(json!({ "error": message }).to_string())
    }

    /// Return a 200 OK response with the data provided.
    fn ok_data<T: Serialize>(&self, body: T) -> Response<Full<Bytes>> {
        match serde_json::to_string(&body) {
            Ok(data) => self.respond(StatusCode::OK, Bytes::from(data)),
            Err(err) => self.server_error(&err.to_string()),
        }
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(&self, message: &str) -> Response<Full<Bytes>> {
        error!("{}", message);
        self.respond(StatusCode::INTERNAL_SERVER_ERROR, Self::error_body(message))
    }

    /// Return a 404 Not Found response with the message provided. The message here is optional.
    /// Leave it empty for no message.
    fn not_found(&self, message: &str) -> Response<Full<Bytes>> {
        let body = if message.is_empty() {
            Bytes::new()
        } else {
            Self::error_body(message)
        };
        self.respond(StatusCode::NOT_FOUND, body)
    }

    /// Return a 400 Bad Request response with the message provided.
    fn bad_request(&self, message: &str) -> Response<Full<Bytes>> {
        self.respond(StatusCode::BAD_REQUEST, Self::error_body(message))
    }

    fn route(&self, method: &Method, uri: &Uri) -> Response<Full<Bytes>> {
        match method {
            &Method::GET => match uri.path().trim_end_matches('/') {
                "/open_restaurants" => self.open_restaurants(uri),
                "/restaurants" => self.restaurant_schedule(uri),
                _ => self.not_found(""),
            },
            _ => self.not_found(""),
        }
    }
}

impl Service<Request<Incoming>> for Server {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.route(req.method(), req.uri());
        Box::pin(async move { Ok(res) })
    }
}
