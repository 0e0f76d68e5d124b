//! 语言 → 文件扩展名映射

use phf::phf_map;

/// 支持同步的语言及其扩展名
static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "C++" => ".cpp",
    "Java" => ".java",
    "Python" => ".py",
    "Python3" => ".py",
    "JavaScript" => ".js",
    "TypeScript" => ".ts",
    "C" => ".c",
    "C#" => ".cs",
    "Go" => ".go",
    "Rust" => ".rs",
    "Kotlin" => ".kt",
};

/// 提取时在页面上按精确文本查找的语言标签
///
/// 不包含 `C`：页面上单独的 "C" 文本节点太多，无法可靠地当作语言标签。
pub const DETECTABLE_LANGUAGES: &[&str] = &[
    "C++",
    "Java",
    "Python",
    "Python3",
    "JavaScript",
    "TypeScript",
    "C#",
    "Go",
    "Rust",
    "Kotlin",
];

/// 获取语言对应的扩展名（含前导 `.`）
pub fn extension_for(language: &str) -> Option<&'static str> {
    EXTENSIONS.get(language).copied()
}
