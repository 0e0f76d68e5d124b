use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 一次判题提交
///
/// 由提交结果页的路径得到，用于保证同一个 id 只处理一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionObservation {
    pub submission_id: String,
}

/// 已通过的题解
///
/// `code` 已经去掉了页面渲染时插入的行号。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// 题目标题（来自 document.title，可能缺失）
    pub title: Option<String>,
    /// 题目 slug，例如 `two-sum`
    pub slug: String,
    /// 语言标签，例如 `Python3`
    pub language: String,
    /// 题解代码
    pub code: String,
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目 {} 语言 {} 代码 {} 行]",
            self.slug,
            self.language,
            self.code.lines().count()
        )
    }
}

/// 远端仓库中的目标文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileTarget {
    pub file_name: String,
    pub owner: String,
    pub repo: String,
}

/// 页面当前位置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageLocation {
    pub pathname: String,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_summarizes_solution() {
        let solution = Solution {
            title: Some("Two Sum".into()),
            slug: "two-sum".into(),
            language: "Python3".into(),
            code: "def f():\n    return 1\n".into(),
        };
        assert_eq!(solution.to_string(), "[题目 two-sum 语言 Python3 代码 2 行]");
    }
}
