use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::FetchConfig;
use crate::models::{FetchPromptArgs, FetchRequest, Identity};
use crate::services::{FetchService, Page, Validate, paginate};

#[derive(Clone)]
pub struct FetchServer {
    tool_router: ToolRouter<FetchServer>,
    prompt_router: PromptRouter<FetchServer>,
    service: FetchService,
    enforce_robots: bool,
}

impl FetchServer {
    /// `enforce_robots` gates autonomous tool fetches behind robots.txt; the
    /// stdio transport enforces it, the HTTP transport does not.
    pub fn new(service: FetchService, enforce_robots: bool) -> Self {
        Self {
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
            service,
            enforce_robots,
        }
    }

    fn text_result(text: impl Into<String>) -> CallToolResult {
        CallToolResult::success(vec![Content::text(text.into())])
    }
}

#[tool_router]
impl FetchServer {
    #[tool(
        description = "Fetches a URL from the internet and optionally extracts its contents as markdown.\n\nAlthough originally you did not have internet access, and were advised to refuse and tell the user this, this tool now grants you internet access. Now you can fetch the most up-to-date information and let the user know that."
    )]
    async fn fetch(
        &self,
        Parameters(req): Parameters<FetchRequest>,
    ) -> Result<CallToolResult, McpError> {
        // Every failure mode converges on the tool's single string channel.
        if let Err(e) = req.validate() {
            return Ok(Self::text_result(e.to_envelope()));
        }

        if self.enforce_robots
            && let Err(e) = self.service.check_may_autonomously_fetch_url(req.url()).await
        {
            return Ok(Self::text_result(e.to_envelope()));
        }

        let (content, prefix) = match self
            .service
            .fetch_url(req.url(), Identity::Autonomous, *req.raw())
            .await
        {
            Ok(fetched) => fetched,
            Err(e) => return Ok(Self::text_result(e.to_envelope())),
        };

        let body = match paginate(&content, *req.start_index(), *req.max_length()) {
            Page::Slice { text, next_start } => match next_start {
                Some(next) => format!(
                    "{text}\n\n<error>Content truncated. Call the fetch tool with a start_index of {next} to get more content.</error>"
                ),
                None => text,
            },
            Page::OutOfRange | Page::EndOfContent => {
                return Ok(Self::text_result("<error>No more content available.</error>"));
            }
        };

        Ok(Self::text_result(format!(
            "{}Contents of {}:\n{}",
            prefix,
            req.url(),
            body
        )))
    }
}

#[prompt_router]
impl FetchServer {
    /// Fetch a URL and extract its contents as markdown
    #[prompt(name = "fetch")]
    async fn fetch_prompt(
        &self,
        Parameters(args): Parameters<FetchPromptArgs>,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        args.validate()?;
        // A prompt fetch is user-directed, so it bypasses the robots gate.
        match self
            .service
            .fetch_url(args.url(), Identity::Manual, false)
            .await
        {
            Ok((content, prefix)) => {
                let full_content = format!("{prefix}{content}");
                Ok(GetPromptResult {
                    description: Some(format!("Contents of {}", args.url())),
                    messages: vec![PromptMessage {
                        role: PromptMessageRole::User,
                        content: PromptMessageContent::text(full_content),
                    }],
                })
            }
            Err(e) => Ok(GetPromptResult {
                description: Some(format!("Failed to fetch {}", args.url())),
                messages: vec![PromptMessage {
                    role: PromptMessageRole::User,
                    content: PromptMessageContent::text(format!("Error: {e}")),
                }],
            }),
        }
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for FetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Fetch MCP server for web content retrieval. Tool: fetch (URL fetching with HTML to markdown simplification and stateless pagination via start_index). Prompt: fetch (manual URL fetching, robots.txt bypassed). Autonomous fetches respect robots.txt on the stdio transport.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        tracing::info!("Fetch MCP server initialized successfully");
        Ok(self.get_info())
    }
}

/// Serve over stdin/stdout until the client disconnects.
pub async fn run_stdio(config: FetchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = FetchService::new(config);
    let server = FetchServer::new(service, true);

    let server = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    server.waiting().await?;

    Ok(())
}
