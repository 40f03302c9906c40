//! Tree-sitter based multi-language parser.

pub mod lower;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tree_sitter::{Language as TsLanguage, Parser as TsParser, Tree};

use crate::core::{Error, Language, Result, SourceFile};

/// Thread-safe parser pool for multi-language parsing.
pub struct Parser {
    /// Cached parsers per language.
    parsers: Mutex<HashMap<Language, TsParser>>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Parse a file and return the syntax tree.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult> {
        let file = SourceFile::load(path)?;
        self.parse_source(&file)
    }

    /// Parse source content.
    pub fn parse_source(&self, file: &SourceFile) -> Result<ParseResult> {
        self.parse(&file.content, file.language, &file.path)
    }

    /// Parse content with explicit language.
    pub fn parse(&self, content: &[u8], lang: Language, path: &Path) -> Result<ParseResult> {
        let ts_lang = get_tree_sitter_language(lang);

        let tree = {
            let mut parsers = self.parsers.lock();
            let parser = parsers.entry(lang).or_insert_with(|| {
                let mut p = TsParser::new();
                p.set_language(&ts_lang).expect("Language should be valid");
                p
            });

            parser.parse(content, None).ok_or_else(|| Error::Parse {
                path: path.to_path_buf(),
                message: "Failed to parse file".to_string(),
            })?
        };

        Ok(ParseResult {
            tree: Arc::new(tree),
            source: content.to_vec(),
            language: lang,
            path: path.to_path_buf(),
        })
    }
}

/// Result of parsing a source file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed syntax tree.
    pub tree: Arc<Tree>,
    /// Original source content.
    pub source: Vec<u8>,
    /// Detected language.
    pub language: Language,
    /// File path.
    pub path: std::path::PathBuf,
}

impl ParseResult {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }
}

/// Get tree-sitter language for a Language enum value.
pub fn get_tree_sitter_language(lang: Language) -> TsLanguage {
    let ts_lang = match lang {
        Language::CSharp => tree_sitter_c_sharp::LANGUAGE,
        Language::Java => tree_sitter_java::LANGUAGE,
        Language::TypeScript | Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX,
        Language::JavaScript | Language::Jsx => tree_sitter_javascript::LANGUAGE,
    };
    ts_lang.into()
}

/// A function or method declaration extracted from the AST.
#[derive(Debug, Clone)]
pub struct FunctionNode<'tree> {
    /// Function name.
    pub name: String,
    /// Start line (1-indexed).
    pub start_line: u32,
    /// End line (1-indexed).
    pub end_line: u32,
    /// The declaration node, used for lowering.
    pub node: tree_sitter::Node<'tree>,
}

/// Extract scorable function declarations from a parse result.
///
/// Lambdas and anonymous callbacks are not extracted: their bodies are
/// scored as part of the enclosing declaration.
pub fn extract_functions(result: &ParseResult) -> Vec<FunctionNode<'_>> {
    let mut functions = Vec::new();
    let root = result.root_node();
    let function_types = get_function_node_types(result.language);

    fn visit<'tree>(
        node: tree_sitter::Node<'tree>,
        source: &[u8],
        function_types: &[&str],
        functions: &mut Vec<FunctionNode<'tree>>,
    ) {
        if function_types.contains(&node.kind()) {
            if let Some(func) = extract_function_info(&node, source) {
                functions.push(func);
            }
        }

        for child in node.children(&mut node.walk()) {
            visit(child, source, function_types, functions);
        }
    }

    visit(root, &result.source, function_types, &mut functions);

    functions
}

fn get_function_node_types(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::CSharp | Language::Java => &["method_declaration", "constructor_declaration"],
        Language::TypeScript | Language::JavaScript | Language::Tsx | Language::Jsx => &[
            "function_declaration",
            "method_definition",
            "function_expression",
        ],
    }
}

fn extract_function_info<'tree>(
    node: &tree_sitter::Node<'tree>,
    source: &[u8],
) -> Option<FunctionNode<'tree>> {
    let name = node
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
        .map(|s| s.to_string())?;

    Some(FunctionNode {
        name,
        start_line: node.start_position().row as u32 + 1,
        end_line: node.end_position().row as u32 + 1,
        node: *node,
    })
}
