//! Test fixtures and PDF builders.
//!
//! Provides a builder for creating test PDFs in memory with LoPDF, optionally
//! protected with a user password using the standard security handler
//! (RC4, 128-bit key).

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for creating test PDFs with custom content.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let bytes = TestPdfBuilder::new()
///     .with_page("Statement for January")
///     .with_page("Transactions")
///     .with_user_password("19900101")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    pages: Vec<String>,
    user_password: Option<String>,
    owner_password: String,
    without_pages: bool,
}

impl TestPdfBuilder {
    /// Creates a new builder for an unprotected, single-page document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            user_password: None,
            owner_password: "owner-secret".to_string(),
            without_pages: false,
        }
    }

    /// Adds a page containing a single line of text.
    pub fn with_page(mut self, text: &str) -> Self {
        self.pages.push(text.to_string());
        self
    }

    /// Protects the document with a user password.
    pub fn with_user_password(mut self, password: &str) -> Self {
        self.user_password = Some(password.to_string());
        self
    }

    pub fn with_owner_password(mut self, password: &str) -> Self {
        self.owner_password = password.to_string();
        self
    }

    /// Builds a page tree with no pages, so there is no first page to read.
    pub fn without_pages(mut self) -> Self {
        self.without_pages = true;
        self
    }

    /// Number of pages the built document will have.
    pub fn page_count(&self) -> usize {
        if self.without_pages {
            0
        } else {
            self.pages.len().max(1)
        }
    }

    /// Builds the PDF and returns its bytes.
    pub fn build(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let texts = if self.without_pages {
            Vec::new()
        } else if self.pages.is_empty() {
            vec!["Monthly Statement".to_string()]
        } else {
            self.pages.clone()
        };

        let mut kids: Vec<Object> = Vec::with_capacity(texts.len());
        for text in &texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set(
            "ID",
            Object::Array(vec![
                Object::string_literal("pdfunlock-fixture-id"),
                Object::string_literal("pdfunlock-fixture-id"),
            ]),
        );

        if let Some(user_password) = &self.user_password {
            let version = EncryptionVersion::V2 {
                document: &doc,
                owner_password: &self.owner_password,
                user_password,
                key_length: 128,
                permissions: Permissions::all(),
            };
            let state = EncryptionState::try_from(version)?;
            doc.encrypt(&state)?;
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build_to(self, output_path: &Path) -> Result<PathBuf> {
        fs::write(output_path, self.build()?)?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quick helper for an unprotected statement.
pub fn plain_statement() -> Result<Vec<u8>> {
    TestPdfBuilder::new()
        .with_page("Monthly Statement")
        .with_page("Transactions")
        .build()
}

/// Quick helper for a statement protected with `password`.
pub fn protected_statement(password: &str) -> Result<Vec<u8>> {
    TestPdfBuilder::new()
        .with_page("Monthly Statement")
        .with_page("Transactions")
        .with_user_password(password)
        .build()
}

/// Owned password pool from string literals.
pub fn pool(passwords: &[&str]) -> Vec<String> {
    passwords.iter().map(|p| p.to_string()).collect()
}
