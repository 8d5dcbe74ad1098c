//! Lookup tables driving every heuristic: section aliases, skill buckets,
//! domain keywords, gazetteers and stopwords.
//!
//! Defaults are compiled in. A JSON file (see `Config::lexicon_path`) may
//! override any subset of tables; omitted tables keep their defaults.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::resume::{Domain, Section, SkillCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionAliases {
    pub section: Section,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable {
    pub category: SkillCategory,
    pub skills: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainKeywords {
    pub domain: Domain,
    pub keywords: Vec<String>,
}

/// Immutable, process-wide lookup tables. Shared behind an `Arc` in `AppState`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Checked in order; the first canonical section whose alias matches wins.
    pub section_aliases: Vec<SectionAliases>,
    /// Substring markers that classify a mined term as a skill.
    pub technical_markers: Vec<String>,
    /// Words never reported as general keywords.
    pub keyword_stopwords: HashSet<String>,
    /// Removed before job-description n-grams are formed.
    pub english_stopwords: HashSet<String>,
    /// Checked in order; tokens matching none land in `Other`.
    pub skill_categories: Vec<CategoryTable>,
    /// Tokens dropped from skill lists (case-insensitive).
    pub noise_skills: HashSet<String>,
    /// Priority order: first domain with any keyword hit wins.
    pub domains: Vec<DomainKeywords>,
    pub critical_terms: Vec<String>,
}

impl Lexicon {
    /// Loads a JSON override file on top of the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Lexicon file '{}' is not valid JSON", path.display()))
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            section_aliases: vec![
                SectionAliases {
                    section: Section::Experience,
                    aliases: owned(&[
                        "experience",
                        "work experience",
                        "employment",
                        "professional experience",
                        "work history",
                    ]),
                },
                SectionAliases {
                    section: Section::Projects,
                    aliases: owned(&["projects", "selected projects", "notable projects"]),
                },
                SectionAliases {
                    section: Section::Skills,
                    aliases: owned(&["skills", "technical skills", "tooling"]),
                },
                SectionAliases {
                    section: Section::Education,
                    aliases: owned(&["education", "academics"]),
                },
                SectionAliases {
                    section: Section::Summary,
                    aliases: owned(&["summary", "objective", "profile"]),
                },
            ],
            technical_markers: owned(TECHNICAL_MARKERS),
            keyword_stopwords: set(KEYWORD_STOPWORDS),
            english_stopwords: set(ENGLISH_STOPWORDS),
            skill_categories: vec![
                CategoryTable {
                    category: SkillCategory::Languages,
                    skills: set(&[
                        "python", "java", "c", "c++", "c#", "go", "golang", "typescript",
                        "javascript", "js", "sql", "r", "matlab", "swift", "kotlin", "scala",
                        "rust",
                    ]),
                },
                CategoryTable {
                    category: SkillCategory::FrameworksLibraries,
                    skills: set(&[
                        "react", "node", "flask", "django", "fastapi", "spring", "express",
                        "streamlit", "pytorch", "tensorflow", "keras", "sklearn", "pandas",
                        "numpy", "matplotlib", "seaborn",
                    ]),
                },
                CategoryTable {
                    category: SkillCategory::DataCloud,
                    skills: set(&[
                        "aws", "gcp", "azure", "firebase", "mongodb", "postgres", "mysql",
                        "snowflake", "bigquery", "spark", "hadoop", "airflow", "kafka", "docker",
                        "kubernetes", "redis",
                    ]),
                },
                CategoryTable {
                    category: SkillCategory::DevOps,
                    skills: set(&[
                        "git", "github", "gitlab", "ci", "cd", "ci/cd", "terraform", "ansible",
                        "jenkins", "sentry", "datadog", "grafana", "prometheus",
                    ]),
                },
                CategoryTable {
                    category: SkillCategory::DesignTools,
                    skills: set(&[
                        "figma", "jira", "confluence", "notion", "excel", "tableau", "powerbi",
                        "photoshop", "illustrator",
                    ]),
                },
                CategoryTable {
                    category: SkillCategory::SoftSkills,
                    skills: set(&[
                        "leadership",
                        "collaboration",
                        "communication",
                        "problem-solving",
                        "teamwork",
                        "adaptability",
                        "time management",
                        "stakeholder management",
                        "customer focus",
                    ]),
                },
            ],
            noise_skills: set(&[
                "labeling",
                "logging",
                "experience",
                "engineering",
                "systems",
                "pipelines",
                "ability",
                "applied",
                "application",
            ]),
            domains: vec![
                DomainKeywords {
                    domain: Domain::Tech,
                    keywords: owned(&[
                        "api",
                        "software",
                        "backend",
                        "frontend",
                        "react",
                        "node",
                        "database",
                        "devops",
                        "distributed systems",
                        "design patterns",
                        "cloud",
                    ]),
                },
                DomainKeywords {
                    domain: Domain::Healthcare,
                    keywords: owned(&[
                        "patient",
                        "clinical",
                        "healthcare",
                        "hipaa",
                        "medical",
                        "device",
                    ]),
                },
                DomainKeywords {
                    domain: Domain::Business,
                    keywords: owned(&[
                        "stakeholder",
                        "marketing",
                        "campaign",
                        "sales",
                        "kpi",
                        "roi",
                        "product manager",
                    ]),
                },
                DomainKeywords {
                    domain: Domain::Research,
                    keywords: owned(&[
                        "research",
                        "experiment",
                        "publication",
                        "analysis",
                        "hypothesis",
                    ]),
                },
            ],
            critical_terms: owned(&[
                "software engineering",
                "design patterns",
                "distributed systems",
                "qa",
                "automation",
                "secure",
                "security",
                "enterprise systems",
                "user flows",
                "programming languages",
                "code review",
                "branch management",
                "knowledge base",
                "cloud",
                "infrastructure",
                "compliance",
                "scalable",
                "reliable",
                "documentation",
            ]),
        }
    }
}

const TECHNICAL_MARKERS: &[&str] = &[
    "python", "java", "c++", "javascript", "node", "react", "angular", "vue", "sql", "aws",
    "azure", "gcp", "docker", "kubernetes", "tensorflow", "pytorch", "ai", "ml", "machine",
    "learning", "deep", "neural", "api", "database", "security", "devops", "git", "linux",
    "unix", "testing", "automation", "distributed", "system", "architecture", "backend",
    "frontend", "fullstack",
];

const KEYWORD_STOPWORDS: &[&str] = &[
    "and", "for", "with", "the", "you", "our", "will", "this", "are", "have", "your", "that",
    "job", "description", "skills", "requirements",
];

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];
