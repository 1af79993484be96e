use crate::domain::model::{CompanyInfo, ContactReceipt, ContactSubmission, Service};
use crate::domain::ports::{Endpoint, FallbackProvider};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Company,
    ServiceList,
    ServiceDetail,
    ContactSubmission,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Company => "company",
            ResourceKind::ServiceList => "service-list",
            ResourceKind::ServiceDetail => "service-detail",
            ResourceKind::ContactSubmission => "contact-submission",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompanyRequest;

impl Endpoint for CompanyRequest {
    type Output = CompanyInfo;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Company
    }

    fn path(&self) -> String {
        "/company".to_string()
    }

    fn fallback(&self, provider: &dyn FallbackProvider) -> Option<CompanyInfo> {
        Some(provider.company())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceListRequest;

impl Endpoint for ServiceListRequest {
    type Output = Vec<Service>;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ServiceList
    }

    fn path(&self) -> String {
        "/services".to_string()
    }

    fn fallback(&self, provider: &dyn FallbackProvider) -> Option<Vec<Service>> {
        Some(provider.services())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetailRequest {
    pub id: String,
}

impl ServiceDetailRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for ServiceDetailRequest {
    type Output = Service;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ServiceDetail
    }

    fn path(&self) -> String {
        format!("/services/{}", self.id)
    }

    fn fallback(&self, provider: &dyn FallbackProvider) -> Option<Service> {
        provider.service(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub submission: ContactSubmission,
}

impl ContactRequest {
    pub fn new(submission: ContactSubmission) -> Self {
        Self { submission }
    }
}

impl Endpoint for ContactRequest {
    type Output = ContactReceipt;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ContactSubmission
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/contact".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        let s = &self.submission;
        Some(serde_json::json!({
            "name": s.name,
            "email": s.email,
            "service_interest": s.service_interest,
            "message": s.message,
        }))
    }

    fn fallback(&self, provider: &dyn FallbackProvider) -> Option<ContactReceipt> {
        Some(provider.contact_receipt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_per_kind() {
        assert_eq!(CompanyRequest.path(), "/company");
        assert_eq!(ServiceListRequest.path(), "/services");
        assert_eq!(ServiceDetailRequest::new("4").path(), "/services/4");

        let contact = ContactRequest::new(ContactSubmission {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            service_interest: String::new(),
            message: "hi".to_string(),
        });
        assert_eq!(contact.path(), "/contact");
        assert_eq!(contact.method(), Method::POST);
        assert_eq!(contact.kind(), ResourceKind::ContactSubmission);
        assert_eq!(contact.body().unwrap()["service_interest"], "");
    }

    #[test]
    fn test_kind_display_matches_serde_names() {
        assert_eq!(ResourceKind::ServiceList.to_string(), "service-list");
        assert_eq!(
            serde_json::to_value(ResourceKind::ServiceDetail).unwrap(),
            "service-detail"
        );
    }
}
