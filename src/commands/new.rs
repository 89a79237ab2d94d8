//! Create a new post

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::PostFields;
use crate::Site;

/// Values for a freshly scaffolded post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub tags: Option<String>,
    pub hero_image: Option<String>,
    pub overlay: Option<String>,
    pub published: bool,
    pub lead_break: bool,
}

/// Write `<posts_dir>/<date>-<slug>.md` and return its path
pub fn create_post(site: &Site, post: &NewPost, date: NaiveDate) -> Result<PathBuf> {
    let fields = PostFields {
        body: Some(String::new()),
        author: Some(post.author.clone()),
        title: Some(post.title.clone()),
        tags: post.tags.clone(),
        hero_image: post.hero_image.clone(),
        overlay: post.overlay.clone(),
        review_link: None,
        published: post.published,
        lead_break: post.lead_break,
    };
    // Validate before touching the filesystem
    let text = site.generator().post_text(&fields)?;

    let target_dir = site.posts_dir();
    fs::create_dir_all(&target_dir)?;

    let filename = format!(
        "{}-{}.md",
        date.format("%Y-%m-%d"),
        slug::slugify(&post.title)
    );
    let file_path = target_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, text)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, post: &NewPost) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let path = create_post(site, post, today)?;
    println!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> NewPost {
        NewPost {
            title: "Hello, World!".to_string(),
            author: "Andy".to_string(),
            tags: Some("intro, news".to_string()),
            published: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let path = create_post(&site, &hello(), date).unwrap();
        assert_eq!(path, dir.path().join("_posts/2024-01-15-hello-world.md"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\nlayout: post\ntitle: Hello, World!\nauthor: Andy\ntags:\n  - intro\n  - news\npublished: true\n---\n"
        );
    }

    #[test]
    fn test_create_post_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        create_post(&site, &hello(), date).unwrap();
        let err = create_post(&site, &hello(), date).unwrap_err();
        assert!(err.to_string().contains("File already exists"));
    }

    #[test]
    fn test_create_post_requires_author() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let post = NewPost {
            author: String::new(),
            ..hello()
        };
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert!(create_post(&site, &post, date).is_err());
        assert!(!site.posts_dir().exists());
    }
}
