pub mod github_client;

pub use github_client::{
    ApiResponse, ContentsApi, GithubClient, IdentityApi, PutContentsBody, RepoSummary,
};
