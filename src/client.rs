//! Entry point bundling every resource client over one transport

use crate::error::ClientResult;
use crate::services::{AuthClient, BudgetClient, CategoryClient, ExpenseClient};
use crate::session::Session;
use crate::transport::Transport;

/// All resource clients for one backend, sharing one transport and session
///
/// ```no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use spendwise_cli::{Session, SpendwiseClient};
///
/// let client = SpendwiseClient::new("http://localhost:8000", Session::in_memory())?;
/// let categories = client.categories().fetch_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpendwiseClient {
    transport: Transport,
}

impl SpendwiseClient {
    pub fn new(base_url: &str, session: Session) -> ClientResult<Self> {
        Ok(Self::from_transport(Transport::new(base_url, session)?))
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn categories(&self) -> CategoryClient {
        CategoryClient::new(self.transport.clone())
    }

    pub fn expenses(&self) -> ExpenseClient {
        ExpenseClient::new(self.transport.clone())
    }

    pub fn budgets(&self) -> BudgetClient {
        BudgetClient::new(self.transport.clone())
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.transport.clone())
    }

    pub fn session(&self) -> &Session {
        self.transport.session()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
