use crate::domain::model::{
    CompanyAbout, CompanyContact, CompanyInfo, ContactReceipt, Service, ServiceDetail,
};
use crate::domain::ports::FallbackProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const DEMO_RECEIPT_MESSAGE: &str = "Message received (demo mode - not saved to database)";

/// What the service-detail fallback does for an id that is not in the fixed
/// list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum), value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum UnknownServicePolicy {
    /// Serve the first fixed service instead.
    #[default]
    DefaultService,
    /// Serve nothing; the failure is shown on its own.
    NotFound,
}

/// Built-in hard-coded content.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallback {
    unknown_service: UnknownServicePolicy,
}

impl StaticFallback {
    pub fn new(unknown_service: UnknownServicePolicy) -> Self {
        Self { unknown_service }
    }

    pub fn unknown_service_policy(&self) -> UnknownServicePolicy {
        self.unknown_service
    }
}

impl FallbackProvider for StaticFallback {
    fn company(&self) -> CompanyInfo {
        company_info()
    }

    fn services(&self) -> Vec<Service> {
        service_catalog().to_vec()
    }

    fn service(&self, id: &str) -> Option<Service> {
        let catalog = service_catalog();
        match catalog.iter().find(|s| s.id == id) {
            Some(found) => Some(found.clone()),
            None => match self.unknown_service {
                UnknownServicePolicy::DefaultService => catalog.first().cloned(),
                UnknownServicePolicy::NotFound => None,
            },
        }
    }

    fn contact_receipt(&self) -> ContactReceipt {
        ContactReceipt {
            message: Some(DEMO_RECEIPT_MESSAGE.to_string()),
            database: Some("demo".to_string()),
            ..ContactReceipt::default()
        }
    }
}

fn company_info() -> CompanyInfo {
    let social_media: BTreeMap<String, String> = ["linkedin", "twitter", "facebook", "instagram"]
        .iter()
        .map(|network| (network.to_string(), "#".to_string()))
        .collect();

    CompanyInfo {
        id: None,
        name: "AximoIX".to_string(),
        motto: "Innovate. Engage. Grow.".to_string(),
        tagline: "Empowering Business, Amplifying Success".to_string(),
        description: "AximoIX is a dynamic company offering a range of services, including ICT solutions, AI solutions, advertising and marketing, programming and coding, and financial technology. We partner with businesses to drive growth, improve efficiency, and achieve success.".to_string(),
        about: CompanyAbout {
            goal: "Empower businesses to thrive through innovative technology, creative marketing, and strategic financial solutions.".to_string(),
            vision: "To be a leading provider of integrated ICT, AI, advertising, programming, and financial technology solutions, driving business growth and success.".to_string(),
            mission: "At AximoIX, our mission is to deliver tailored solutions that combine technology, creativity, and innovation, fostering long-term partnerships and driving business success.".to_string(),
        },
        contact: CompanyContact {
            email: "hello@aximoix.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            address: "123 Innovation Drive, Tech City, TC 12345".to_string(),
            social_media,
        },
        updated_at: None,
    }
}

fn service_catalog() -> &'static [Service] {
    static CATALOG: OnceLock<Vec<Service>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            service(
                "1",
                "ICT Solutions",
                "Technology solutions for businesses - infrastructure, networking, and digital transformation services.",
                "Monitor",
                &[
                    "Network Infrastructure",
                    "Cloud Solutions",
                    "Digital Transformation",
                    "IT Consulting",
                ],
                "Our ICT solutions provide comprehensive technology infrastructure and digital transformation services to modernize your business operations.",
                &[
                    "Improved operational efficiency and productivity",
                    "Enhanced security and data protection",
                    "Scalable infrastructure that grows with your business",
                ],
                &[
                    "Cloud Platforms (AWS, Azure, Google Cloud)",
                    "Network Security Systems",
                    "Enterprise Software Solutions",
                ],
                &[
                    "Migrated 500+ employee company to cloud infrastructure, reducing IT costs by 40%",
                ],
            ),
            service(
                "2",
                "AI Solutions",
                "Artificial intelligence-powered solutions to automate processes and enhance decision-making.",
                "Brain",
                &[
                    "Machine Learning",
                    "Predictive Analytics",
                    "Process Automation",
                    "AI Consulting",
                ],
                "Transform your business with cutting-edge AI solutions that automate complex processes and provide predictive insights.",
                &[
                    "Automated workflow processes saving 60% manual effort",
                    "Predictive analytics for better business forecasting",
                    "Enhanced customer experience through AI chatbots",
                ],
                &[
                    "Machine Learning Algorithms",
                    "Natural Language Processing",
                    "Computer Vision",
                ],
                &["Developed AI chatbot reducing customer service response time by 75%"],
            ),
            service(
                "3",
                "Advertising & Marketing",
                "Creative campaigns and strategies to amplify your brand and reach your target audience.",
                "Megaphone",
                &[
                    "Digital Marketing",
                    "Brand Strategy",
                    "Creative Campaigns",
                    "Social Media Marketing",
                ],
                "Our comprehensive marketing and advertising services help businesses build strong brand presence and drive measurable growth.",
                &[
                    "Increased brand visibility and recognition",
                    "Higher customer engagement and conversion rates",
                    "Data-driven marketing strategies for better ROI",
                ],
                &[
                    "Marketing Automation Platforms",
                    "Social Media Management Tools",
                    "Analytics and Tracking Systems",
                ],
                &["Increased client's social media engagement by 300% in 6 months"],
            ),
            service(
                "4",
                "Programming & Coding",
                "Custom software development solutions tailored to your business needs and objectives.",
                "Code",
                &["Web Development", "Mobile Apps", "Custom Software", "API Integration"],
                "Our expert development team creates custom software solutions specifically designed to meet your unique business requirements.",
                &[
                    "Custom solutions tailored to your specific needs",
                    "Scalable architecture for future growth",
                    "Modern, responsive user interfaces",
                ],
                &[
                    "React, Node.js, Python, Java",
                    "Mobile Development (React Native, Flutter)",
                    "Database Systems (MongoDB, PostgreSQL)",
                ],
                &["Built e-commerce platform handling 10,000+ daily transactions"],
            ),
            service(
                "5",
                "Financial Technology",
                "Innovative fintech solutions to streamline financial processes and enhance user experience.",
                "CreditCard",
                &[
                    "Payment Systems",
                    "Digital Banking",
                    "Blockchain Solutions",
                    "Financial Analytics",
                ],
                "Our fintech solutions revolutionize financial operations through secure payment systems and advanced financial analytics.",
                &[
                    "Secure and compliant financial transactions",
                    "Streamlined payment processing",
                    "Advanced financial analytics and reporting",
                ],
                &[
                    "Payment Gateway Integration",
                    "Blockchain Platforms",
                    "Digital Wallet Systems",
                ],
                &["Implemented payment system processing $1M+ monthly transactions"],
            ),
        ]
    })
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    features: &[&str],
    overview: &str,
    benefits: &[&str],
    technologies: &[&str],
    case_studies: &[&str],
) -> Service {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        features: owned(features),
        detailed_info: Some(ServiceDetail {
            overview: overview.to_string(),
            benefits: owned(benefits),
            technologies: owned(technologies),
            case_studies: owned(case_studies),
        }),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_active_services_in_order() {
        let services = StaticFallback::default().services();
        let ids: Vec<&str> = services.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(services.iter().all(|s| s.is_active && s.detailed_info.is_some()));
    }

    #[test]
    fn test_lookup_by_id() {
        let provider = StaticFallback::default();
        let ai = provider.service("2").unwrap();

        assert_eq!(ai.title, "AI Solutions");
        assert_eq!(ai.icon, "Brain");
    }

    #[test]
    fn test_unknown_id_follows_policy() {
        let lenient = StaticFallback::new(UnknownServicePolicy::DefaultService);
        assert_eq!(lenient.service("99").unwrap().id, "1");

        let strict = StaticFallback::new(UnknownServicePolicy::NotFound);
        assert!(strict.service("99").is_none());
        assert!(strict.service("5").is_some());
    }

    #[test]
    fn test_company_and_demo_receipt() {
        let provider = StaticFallback::default();
        let company = provider.company();
        assert_eq!(company.name, "AximoIX");
        assert_eq!(company.contact.social_media.len(), 4);

        let receipt = provider.contact_receipt();
        assert_eq!(receipt.message.as_deref(), Some(DEMO_RECEIPT_MESSAGE));
        assert_eq!(receipt.database.as_deref(), Some("demo"));
        assert!(receipt.id.is_none());
    }
}
