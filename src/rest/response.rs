//! Success envelopes: `{"status": "success", ...}`.
//!
//! The failure envelope lives next to `ApiError` in `crate::errors`.

use serde::Serialize;

/// List response with a result count
#[derive(Debug, Clone, Serialize)]
pub struct ListBody<T: Serialize> {
    pub status: &'static str,
    pub count: usize,
    pub data: ListData<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListData<T: Serialize> {
    pub tours: Vec<T>,
}

impl<T: Serialize> ListBody<T> {
    pub fn new(tours: Vec<T>) -> Self {
        let count = tours.len();
        Self {
            status: "success",
            count,
            data: ListData { tours },
        }
    }
}

/// Single-document response
#[derive(Debug, Clone, Serialize)]
pub struct SingleBody<T: Serialize> {
    pub status: &'static str,
    pub data: SingleData<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SingleData<T: Serialize> {
    pub tour: T,
}

impl<T: Serialize> SingleBody<T> {
    pub fn new(tour: T) -> Self {
        Self {
            status: "success",
            data: SingleData { tour },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope() {
        let body = ListBody::new(vec![json!({"name": "a"}), json!({"name": "b"})]);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"]["tours"][1]["name"], "b");
    }

    #[test]
    fn test_single_envelope() {
        let body = SingleBody::new(json!({"name": "a"}));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["tour"]["name"], "a");
    }
}
