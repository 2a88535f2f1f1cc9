use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned by the store when an article is created.
/// Stores disagree on whether ids are numbers or strings; the id keeps the
/// representation the store returned so it is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(u64),
    Text(String),
}

/// An article without an id: the payload of a create, and the content of
/// every stored [`Article`].
///
/// Store documents use Portuguese field names (`titulo`,
/// `descricao`, `conteudo`, ...). The publish date is read from the first
/// non-empty of `data`, `dataPublicacao` and `data_publicacao` and always
/// written back as `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArticleDocument", into = "ArticleDocument")]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    /// Free-form article body.
    pub body: Option<String>,
    /// Free-form category label. Not validated against any known set.
    pub category: Option<String>,
    pub author: Option<String>,
    /// Publish date as stored, normally `YYYY-MM-DD`.
    pub published: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    /// Fallback URL of the primary image.
    pub image_url: Option<String>,
    /// Primary image embedded as a data URL. Takes precedence over
    /// `image_url`.
    pub image_embedded: Option<String>,
    pub gallery_urls: Vec<String>,
    /// Embedded gallery. Takes precedence over `gallery_urls` when non-empty.
    pub gallery_embedded: Vec<String>,
}

/// A stored article. Serialized as a flat document with its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArticleDocument", into = "ArticleDocument")]
pub struct Article {
    pub id: ArticleId,
    pub content: ArticleDraft,
}

// Every field is read leniently: a value of the wrong type reads as absent
// instead of failing the whole document.
#[derive(Clone, Default, Serialize, Deserialize)]
struct ArticleDocument {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<ArticleId>,
    #[serde(default, deserialize_with = "lenient")]
    titulo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    descricao: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    conteudo: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    categoria: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    autor: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    data: Option<String>,
    #[serde(
        rename = "dataPublicacao",
        default,
        deserialize_with = "lenient",
        skip_serializing
    )]
    data_publicacao_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    data_publicacao: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    destaque: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    imagem: Option<String>,
    #[serde(
        rename = "imagemBase64",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    imagem_base64: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_images",
        skip_serializing_if = "Vec::is_empty"
    )]
    galeria: Vec<String>,
    #[serde(
        rename = "galeriaBase64",
        default,
        deserialize_with = "deserialize_images",
        skip_serializing_if = "Vec::is_empty"
    )]
    galeria_base64: Vec<String>,

    // English spellings. Read only; the Portuguese key wins when both are set.
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    body: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    author: Option<String>,
    #[serde(
        rename = "publishedDate",
        default,
        deserialize_with = "lenient",
        skip_serializing
    )]
    published_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag", skip_serializing)]
    featured: Option<bool>,
}

impl From<ArticleDocument> for ArticleDraft {
    fn from(document: ArticleDocument) -> Self {
        // Publish-date fields, in priority order.
        let published = [
            document.data,
            document.published_date,
            document.data_publicacao_camel,
            document.data_publicacao,
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty());

        Self {
            title: document.titulo.or(document.title).unwrap_or_default(),
            description: document
                .descricao
                .or(document.description)
                .unwrap_or_default(),
            body: document.conteudo.or(document.body),
            category: document.categoria.or(document.category),
            author: document.autor.or(document.author),
            published,
            tags: document.tags,
            featured: document.destaque.or(document.featured).unwrap_or(false),
            image_url: document.imagem,
            image_embedded: document.imagem_base64,
            gallery_urls: document.galeria,
            gallery_embedded: document.galeria_base64,
        }
    }
}

impl From<ArticleDraft> for ArticleDocument {
    fn from(draft: ArticleDraft) -> Self {
        Self {
            titulo: Some(draft.title),
            descricao: Some(draft.description),
            conteudo: draft.body,
            categoria: draft.category,
            autor: draft.author,
            data: draft.published,
            tags: draft.tags,
            destaque: Some(draft.featured),
            imagem: draft.image_url,
            imagem_base64: draft.image_embedded,
            galeria: draft.gallery_urls,
            galeria_base64: draft.gallery_embedded,
            ..Self::default()
        }
    }
}

impl TryFrom<ArticleDocument> for Article {
    type Error = String;

    fn try_from(mut document: ArticleDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .take()
            .ok_or_else(|| "article document has no id".to_string())?;
        Ok(Self {
            id,
            content: document.into(),
        })
    }
}

impl From<Article> for ArticleDocument {
    fn from(article: Article) -> Self {
        Self {
            id: Some(article.id),
            ..article.content.into()
        }
    }
}

/// Split a comma-joined tag string, trimming each piece and dropping empty
/// ones.
pub fn parse_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// A value of the expected type, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Loose<T> {
    fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Loose<T>>::deserialize(deserializer)?.and_then(Loose::into_value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

// Loose truthiness: non-zero numbers and non-empty strings other than
// "false"/"0" count as set, as do lists and objects. Null reads as absent.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(value) => value,
        Flag::Number(value) => value != 0.0 && !value.is_nan(),
        Flag::Text(value) => {
            let value = value.trim();
            !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
        }
        Flag::Other(_) => true,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    List(Vec<Loose<String>>),
    Joined(String),
    Other(IgnoredAny),
}

fn strings(list: Vec<Loose<String>>) -> Vec<String> {
    list.into_iter().filter_map(Loose::into_value).collect()
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringList>::deserialize(deserializer)? {
        Some(StringList::List(tags)) => strings(tags),
        Some(StringList::Joined(joined)) => parse_tags(&joined),
        Some(StringList::Other(_)) | None => Vec::new(),
    })
}

// Data URLs contain commas, so a single string is one image, never a list.
fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringList>::deserialize(deserializer)? {
        Some(StringList::List(images)) => strings(images),
        Some(StringList::Joined(image)) if !image.is_empty() => vec![image],
        Some(StringList::Joined(_) | StringList::Other(_)) | None => Vec::new(),
    })
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ArticleId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
