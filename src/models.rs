use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::ConfigError;

/// A headline number shown on the home page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Stat {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Group of skills under a heading (Frontend, Backend, ...)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
    #[serde(default)]
    pub badge: String,
}

/// A project card in the gallery
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Static image asset referenced by the card
    #[serde(default)]
    pub image: Option<String>,
    pub repository_url: String,
    #[serde(default)]
    pub live_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub icon: String,
    pub label: String,
    pub href: String,
    pub value: String,
}

/// All static content rendered by the pages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub headline: String,
    pub headline_accent: String,
    pub tagline: String,
    pub technologies: Vec<String>,
    pub stats: Vec<Stat>,
    pub bio: String,
    /// Terms emphasized wherever they appear in the bio
    pub bio_highlights: Vec<String>,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub contact_links: Vec<ContactLink>,
}

impl Portfolio {
    /// Load content from a YAML file; fields it omits keep the built-in values
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Portfolio {
    fn default() -> Self {
        Portfolio {
            headline: "Building Digital Experiences".into(),
            headline_accent: "With Modern Technologies".into(),
            tagline: "Full-stack developer crafting beautiful and functional web applications that solve real-world problems".into(),
            technologies: strings(&[
                "React", "TypeScript", "Node.js", "Next.js", "TailwindCSS", "MongoDB",
                "PostgreSQL", "AWS",
            ]),
            stats: vec![
                Stat::new("Years Experience", "5+"),
                Stat::new("Projects Completed", "50+"),
                Stat::new("Happy Clients", "30+"),
                Stat::new("Client Satisfaction", "100%"),
            ],
            bio: "4.5 years of experience working with JavaScript, React, C# and .NET. I have built full stack web applications for BTG Pactual (World's best SME Bank), such as internet banking features, webviews and backoffice platforms. Additionally, I have built a project for my internship using Java, SpringBoot, JavaScript and React.js that assisted in the daily chores of the company staff.".into(),
            bio_highlights: strings(&[
                "4.5 years", "JavaScript", "React", "C#", ".NET", "BTG Pactual", "Java",
                "SpringBoot", "React.js",
            ]),
            skills: vec![
                SkillCategory {
                    category: "Frontend".into(),
                    items: strings(&["React", "JavaScript", "TypeScript", "TailwindCSS"]),
                },
                SkillCategory {
                    category: "Backend".into(),
                    items: strings(&["C#", ".NET", "Java", "Spring Boot"]),
                },
                SkillCategory {
                    category: "Tools".into(),
                    items: strings(&["Git", "Docker", "Playwright", "Figma"]),
                },
            ],
            experience: vec![
                Experience {
                    title: "Software Engineer".into(),
                    company: "BTG Pactual (Largest investment bank in Latam)".into(),
                    period: "July 2021 - Present".into(),
                    achievements: strings(&[
                        "Developed frontend applications that generated over $20M in quarterly revenue",
                        "Wrote E2E tests using Playwright, increasing code coverage to 80%",
                        "Implemented Monorepo and monolith architecture, improving webpage performance by 20%",
                        "Guided newcomers through the codebase and collaborated with the team to build backend APIs and frontend screens",
                    ]),
                },
                Experience {
                    title: "Software Engineer Intern".into(),
                    company: "Onebrain".into(),
                    period: "January 2021 - June 2021".into(),
                    achievements: strings(&[
                        "Designed an automated SMS app, saving 8 hours of manual work weekly",
                        "Worked closely with senior engineers to develop a chat feature using Java and React",
                    ]),
                },
            ],
            education: vec![Education {
                degree: "B.S. Computer Science".into(),
                school: "Universidade Estadual de Campinas".into(),
                year: "2014 - 2020".into(),
            }],
            certifications: vec![
                Certification {
                    name: "AWS Certified Developer".into(),
                    issuer: "Amazon Web Services".into(),
                    year: "2024".into(),
                    badge: "🏅".into(),
                },
                Certification {
                    name: "Professional Cloud Developer".into(),
                    issuer: "Google Cloud".into(),
                    year: "2024".into(),
                    badge: "🎯".into(),
                },
            ],
            projects: vec![
                Project {
                    title: "Portfolio Website".into(),
                    description: "A modern portfolio website built with React, TypeScript, and Tailwind CSS. Features dark mode, animations, and responsive design.".into(),
                    technologies: strings(&["React", "TypeScript", "Tailwind CSS", "Framer Motion"]),
                    image: Some("/projects/portfolio.jpg".into()),
                    repository_url: "https://github.com/yourusername/portfolio".into(),
                    live_url: Some("https://your-portfolio.com".into()),
                },
                Project {
                    title: "E-commerce Platform".into(),
                    description: "Full-stack e-commerce platform with real-time inventory, user authentication, and payment processing.".into(),
                    technologies: strings(&["Next.js", "Node.js", "PostgreSQL", "Stripe"]),
                    image: Some("/projects/ecommerce.jpg".into()),
                    repository_url: "https://github.com/yourusername/ecommerce".into(),
                    live_url: Some("https://your-ecommerce.com".into()),
                },
                Project {
                    title: "Task Management App".into(),
                    description: "Collaborative task management application with real-time updates and team features.".into(),
                    technologies: strings(&["React", "Firebase", "TailwindCSS", "TypeScript"]),
                    image: Some("/projects/taskmanager.jpg".into()),
                    repository_url: "https://github.com/yourusername/taskmanager".into(),
                    live_url: None,
                },
                Project {
                    title: "AI Chat Interface".into(),
                    description: "Modern chat interface for AI interactions with stream responses and code highlighting.".into(),
                    technologies: strings(&["React", "OpenAI API", "WebSockets", "TailwindCSS"]),
                    image: Some("/projects/aichat.jpg".into()),
                    repository_url: "https://github.com/yourusername/aichat".into(),
                    live_url: None,
                },
            ],
            contact_links: vec![
                ContactLink {
                    icon: "📧".into(),
                    label: "Email".into(),
                    href: "mailto:hugodenari.dev@gmail.com".into(),
                    value: "hugodenari.dev@gmail.com".into(),
                },
                ContactLink {
                    icon: "🔗".into(),
                    label: "LinkedIn".into(),
                    href: "https://linkedin.com/in/hugo-stanisce-denari/".into(),
                    value: "linkedin.com/in/hugo-stanisce-denari/".into(),
                },
                ContactLink {
                    icon: "💻".into(),
                    label: "GitHub".into(),
                    href: "https://github.com/hugodenaridev".into(),
                    value: "github.com/hugodenaridev".into(),
                },
                ContactLink {
                    icon: "🏢".into(),
                    label: "Company".into(),
                    href: "https://www.btgpactual.com".into(),
                    value: "BTG Pactual".into(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_content_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.yaml");
        fs::write(
            &path,
            "headline: Hello\nprojects:\n  - title: Folio\n    description: Terminal portfolio\n    repository_url: https://example.com/folio\n",
        )
        .unwrap();

        let portfolio = Portfolio::load(&path).unwrap();
        assert_eq!(portfolio.headline, "Hello");
        assert_eq!(portfolio.projects.len(), 1);
        assert_eq!(portfolio.projects[0].live_url, None);
        assert_eq!(portfolio.skills, Portfolio::default().skills);
    }

    #[test]
    fn test_missing_content_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Portfolio::load(&dir.path().join("nope.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
