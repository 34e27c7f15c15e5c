//! Category rules: named buckets plus ordered keyword lists.
//!
//! Rule order is significant. Earlier rules win when a title matches keywords
//! from several categories, so the set must never be reordered after load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named category and the keywords that route titles into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name, also used as the playlist title stem
    pub name: String,

    /// Keywords tested in order against the video title
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from a name and keyword list
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validation failures for a rule table
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("duplicate category name: {name}")]
    DuplicateCategory { name: String },

    #[error("category name is empty")]
    EmptyCategoryName,

    #[error("category '{category}' contains an empty keyword")]
    EmptyKeyword { category: String },
}

/// An ordered, validated set of category rules.
///
/// Constructed once at startup and passed by reference into the classifier.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Validate and wrap a rule list.
    ///
    /// Rejects duplicate category names (membership would be ambiguous) and
    /// empty keywords (an empty keyword is a substring of every title and
    /// would swallow all records into one category).
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, RuleError> {
        let mut seen = std::collections::HashSet::new();
        for rule in &rules {
            if rule.name.is_empty() {
                return Err(RuleError::EmptyCategoryName);
            }
            if !seen.insert(rule.name.clone()) {
                return Err(RuleError::DuplicateCategory {
                    name: rule.name.clone(),
                });
            }
            if rule.keywords.iter().any(|k| k.is_empty()) {
                return Err(RuleError::EmptyKeyword {
                    category: rule.name.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// The rules, in precedence order
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Category names, in precedence order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    /// The built-in category table, in precedence order.
    fn default() -> Self {
        let rules = vec![
            CategoryRule::new(
                "Programming & Development",
                [
                    "Coded",
                    "VS Code",
                    "YAML",
                    "programming",
                    "development",
                    "coding",
                    "go",
                    "python",
                    "java",
                    "javascript",
                    "Devcontainers",
                    "vscode",
                    "visual studio code",
                    "intellij",
                    "vim",
                    "emacs",
                    "code editor",
                    "ide",
                    "developer",
                    "Angular",
                    "Node.js",
                    "TypeScript",
                    "Stripe",
                ],
            ),
            CategoryRule::new(
                "Cloud & Infrastructure",
                ["cloud", "infrastructure", "aws", "azure", "gcp", "google"],
            ),
            CategoryRule::new(
                "DevOps and CI/CD",
                [
                    "Vault",
                    "Ansible",
                    "secrets management",
                    "HashiCorp",
                    "devops",
                    "ci/cd",
                    "continuous integration",
                    "continuous delivery",
                    "terraform",
                    "platform engineering",
                    "site reliability engineering",
                    "sre",
                ],
            ),
            CategoryRule::new(
                "Containers and Kubernetes",
                [
                    "Operators",
                    "Talos",
                    "KubeCon",
                    "Stateful",
                    "microservices",
                    "Helm",
                    "Knative",
                    "OpenShift",
                    "Open Policy Agent",
                    "K8s",
                    "containers",
                    "kubernetes",
                    "docker",
                    "containerization",
                    "container orchestration",
                ],
            ),
            CategoryRule::new(
                "Data Management and Databases",
                [
                    "schema",
                    "DB",
                    "Data Protection",
                    "Disaster Recovery",
                    "Storage",
                    "data management",
                    "databases",
                    "sql",
                    "nosql",
                    "postgres",
                    "MariaDB",
                    "Cassandra",
                    "Redshift",
                    "BigQuery",
                    "Snowflake",
                    "database",
                ],
            ),
            CategoryRule::new(
                "Cloud-Native and Serverless",
                [
                    "Fermyon",
                    "Service Mesh",
                    "cloud-native",
                    "serverless",
                    "lambda",
                    "functions",
                    "cloudflare",
                    "faas",
                    "paas",
                    "saas",
                    "iaas",
                ],
            ),
            CategoryRule::new(
                "Security and DevSecOps",
                [
                    "Hack",
                    "NIS2",
                    "security",
                    "devsecops",
                    "cybersecurity",
                    "infosec",
                    "information security",
                ],
            ),
            CategoryRule::new(
                "Open Source and Community",
                [
                    "Open-Source",
                    "open source",
                    "community",
                    "opensource",
                    "github",
                    "gitlab",
                    "bitbucket",
                    "source control",
                    "version control",
                    "git",
                    "gitops",
                ],
            ),
            CategoryRule::new(
                "Storytelling and Career Development",
                [
                    "CTO",
                    "CEO",
                    "Story",
                    "Job",
                    "storytelling",
                    "story telling",
                    "career",
                    "mentorship",
                ],
            ),
            CategoryRule::new(
                "AI and Emerging Technologies",
                [
                    "Ai",
                    "GPT",
                    "LLM",
                    "Ollama",
                    "artificial intelligence",
                    "machine learning",
                    "emerging technologies",
                    "blockchain",
                    "quantum computing",
                    "iot",
                    "internet of things",
                    "edge computing",
                    "distributed systems",
                ],
            ),
            CategoryRule::new(
                "Tools and Productivity",
                [
                    "Tmux",
                    "Canva",
                    "tools",
                    "productivity",
                    "efficiency",
                    "automation",
                    "tooling",
                    "toolchain",
                    "toolkit",
                ],
            ),
            CategoryRule::new(
                "Linux",
                [
                    "linux",
                    "ubuntu",
                    "debian",
                    "centos",
                    "redhat",
                    "fedora",
                    "suse",
                    "arch",
                    "manjaro",
                    "kali",
                    "raspberry pi",
                ],
            ),
            CategoryRule::new(
                "Virtualisation",
                [
                    "virtualisation",
                    "virtualization",
                    "vm",
                    "vmware",
                    "virtualbox",
                    "hypervisor",
                    "kvm",
                    "xen",
                    "qemu",
                    "Proxmox",
                    "esxi",
                    "vSphere",
                    "hyper-v",
                ],
            ),
        ];

        // The built-in table is known-good; validation cannot fail here.
        Self { rules }
    }
}
