//! Static content used whenever live articles cannot be obtained.

use crate::models::{Article, NewsBundle};
use crate::utils::now_timestamp;
use tracing::info;

/// Tip attached to bundles built from live articles.
pub const LIVE_TIP: &str = "نصيحة اليوم: حافظ على نشاطك البدني وتناول غذاء متوازن.";

/// Tip attached to the fallback bundle.
pub const FALLBACK_TIP: &str = "نصيحة اليوم: شرب الماء بانتظام يساعد على تحسين التركيز والطاقة.";

fn fallback_article(title: &str, description: &str, url: &str, image: &str) -> Article {
    Article {
        title: title.to_string(),
        description: Some(description.to_string()),
        url: Some(url.to_string()),
        url_to_image: image.to_string(),
        source: None,
        author: None,
        published_at: None,
        content: None,
    }
}

/// The hardcoded bundle: two articles, the fallback tip, and the current time.
pub fn fallback_bundle() -> NewsBundle {
    info!("Using fallback data");
    NewsBundle {
        updated_at: now_timestamp(),
        tip: FALLBACK_TIP.to_string(),
        articles: vec![
            fallback_article(
                "فوائد الصيام المتقطع للصحة العقلية",
                "دراسات جديدة تؤكد دور الصيام في تحسين الوظائف الإدراكية.",
                "https://www.google.com/search?q=فوائد+الصيام+المتقطع",
                "https://images.unsplash.com/photo-1544367563-12123d8965cd?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            ),
            fallback_article(
                "أهمية النوم الجيد للمناعة",
                "النوم لمدة 7-8 ساعات يعزز جهاز المناعة بشكل كبير.",
                "https://www.google.com/search?q=أهمية+النوم",
                "https://images.unsplash.com/photo-1511295742362-92c96b504802?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            ),
        ],
    }
}
