//! Interaction engine: one command in, one reply out.
//!
//! Owns the parser and the three stores, routes each parsed action, and
//! renders every user-facing refusal as a reply. Only storage write failures
//! escape as errors; everything else a user can type is answered in text.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use blindbox_core::{BlindBoxError, Result};
use blindbox_store::{session_key, CatalogStore, PoolManager, SessionManager};

use crate::command::{Action, CommandParser};
use crate::event::MessageEvent;
use crate::reply::{self, Reply};

/// User-facing refusal of a single command.
///
/// Every variant renders to its reply text; none of them is an error and
/// none of them mutates state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown category `{category_id}`")]
    UnknownCategory {
        category_id: String,
        /// Whether the reply appends the full category list as a hint.
        show_catalog: bool,
    },
    #[error("missing category id argument")]
    MissingCategoryId,
    #[error("missing box number argument")]
    MissingBoxNumber,
    #[error("box number is not numeric")]
    NonNumericBoxNumber,
    #[error("box number outside 1..={slots}")]
    OutOfRange { slots: u32 },
    #[error("no category selected for this session")]
    NoActiveSession,
    #[error("selected category no longer exists")]
    StaleSelection,
    #[error("no category id given and no active selection")]
    NoStatusTarget,
}

/// Why a handler did not produce a normal reply.
enum HandlerError {
    /// A user-facing refusal, rendered to a reply by the dispatcher.
    Rejected(Rejection),
    /// A storage failure, surfaced to the caller of [`InteractionEngine::handle`].
    Failed(BlindBoxError),
}

impl From<Rejection> for HandlerError {
    fn from(rejection: Rejection) -> Self {
        HandlerError::Rejected(rejection)
    }
}

impl From<BlindBoxError> for HandlerError {
    fn from(err: BlindBoxError) -> Self {
        HandlerError::Failed(err)
    }
}

type HandlerResult = std::result::Result<Reply, HandlerError>;

/// The blind box interaction engine.
///
/// One instance per process owns all mutable state. The host must deliver
/// commands sequentially; the engine performs no locking of its own.
pub struct InteractionEngine {
    parser: CommandParser,
    catalog: CatalogStore,
    pools: PoolManager,
    sessions: SessionManager,
}

impl InteractionEngine {
    /// Startup lifecycle hook: seed the catalog on first run, load all three
    /// documents, and fill any missing pools.
    pub fn initialize(data_dir: &Path, command_name: &str) -> Result<Self> {
        let catalog = CatalogStore::open(data_dir)?;
        let mut pools = PoolManager::open(data_dir);
        pools.ensure_initialized(catalog.catalog())?;
        let sessions = SessionManager::open(data_dir);
        info!("Blind box engine initialized");
        Ok(Self {
            parser: CommandParser::new(command_name),
            catalog,
            pools,
            sessions,
        })
    }

    /// Shutdown lifecycle hook: final flush of pool and session documents.
    pub fn terminate(&self) -> Result<()> {
        self.pools.flush()?;
        self.sessions.flush()?;
        info!("Blind box state saved");
        Ok(())
    }

    /// Handle one incoming command and compose its reply.
    ///
    /// Validation failures never reach the caller; they become replies.
    /// Only a failed durable write is returned as an error; the in-memory
    /// state is already updated at that point and the next successful write
    /// converges.
    pub fn handle(&mut self, event: &dyn MessageEvent) -> Result<Reply> {
        let command = self.parser.parse(event.raw_text());
        let key = session_key(event.room_identity(), event.user_identity());
        let arg = command.args.first().map(String::as_str);

        let result = match command.action {
            None => Ok(Reply::text(reply::help_text())),
            Some(Action::List) => Ok(self.list_reply()),
            Some(Action::Select) => self.handle_select(&key, arg),
            Some(Action::Open) => self.handle_open(&key, arg),
            Some(Action::Status) => self.handle_status(&key, arg),
        };

        match result {
            Ok(r) => Ok(r),
            Err(HandlerError::Rejected(rejection)) => Ok(self.rejection_reply(&rejection)),
            Err(HandlerError::Failed(e)) => Err(e),
        }
    }

    // -- Action handlers --

    fn handle_select(&mut self, key: &str, arg: Option<&str>) -> HandlerResult {
        let category_id = arg.ok_or(Rejection::MissingCategoryId)?;
        let category = self
            .catalog
            .get(category_id)
            .ok_or_else(|| Rejection::UnknownCategory {
                category_id: category_id.to_string(),
                show_catalog: true,
            })?;

        self.sessions.select(key, category_id)?;

        let remaining = self.pools.remaining(category_id);
        Ok(Reply::with_image(
            reply::selection_text(category, remaining),
            &category.selection_image,
        ))
    }

    fn handle_open(&mut self, key: &str, arg: Option<&str>) -> HandlerResult {
        let arg = arg.ok_or(Rejection::MissingBoxNumber)?;
        if !arg.chars().all(|c| c.is_ascii_digit()) {
            return Err(Rejection::NonNumericBoxNumber.into());
        }

        let category_id = self
            .sessions
            .selected(key)
            .ok_or(Rejection::NoActiveSession)?
            .to_string();
        let category = self
            .catalog
            .get(&category_id)
            .ok_or(Rejection::StaleSelection)?;

        let slots = category.slots;
        // An all-digit argument too large for u64 necessarily exceeds slots.
        let box_number: u64 = arg.parse().map_err(|_| Rejection::OutOfRange { slots })?;
        if box_number < 1 || box_number > u64::from(slots) {
            return Err(Rejection::OutOfRange { slots }.into());
        }

        let outcome = self.pools.draw(&category_id, category)?;
        let item = category.items.get(&outcome.item_id);
        let item_name = item.map_or(outcome.item_id.as_str(), |i| i.name.as_str());
        let item_image = item.map_or("", |i| i.image.as_str());

        Ok(Reply::with_image(
            reply::draw_result_text(
                box_number,
                category,
                item_name,
                outcome.remaining,
                outcome.pool_reset,
            ),
            item_image,
        ))
    }

    fn handle_status(&self, key: &str, arg: Option<&str>) -> HandlerResult {
        let category_id = arg
            .or_else(|| self.sessions.selected(key))
            .ok_or(Rejection::NoStatusTarget)?;
        let category = self
            .catalog
            .get(category_id)
            .ok_or_else(|| Rejection::UnknownCategory {
                category_id: category_id.to_string(),
                show_catalog: false,
            })?;
        Ok(Reply::text(reply::pool_status_text(
            category,
            self.pools.remaining(category_id),
        )))
    }

    // -- Reply composition --

    fn list_reply(&self) -> Reply {
        Reply::text(reply::category_list_text(
            self.catalog.catalog(),
            &self.pools,
        ))
    }

    fn rejection_reply(&self, rejection: &Rejection) -> Reply {
        let text = match rejection {
            Rejection::UnknownCategory {
                category_id,
                show_catalog: true,
            } => format!(
                "不存在种类 `{}`。\n\n{}",
                category_id,
                reply::category_list_text(self.catalog.catalog(), &self.pools),
            ),
            Rejection::UnknownCategory {
                category_id,
                show_catalog: false,
            } => format!("不存在种类 `{}`。", category_id),
            Rejection::MissingCategoryId => {
                "请指定盲盒种类ID，例如：/方舟盲盒 选择 vc17".to_string()
            }
            Rejection::MissingBoxNumber => "请提供序号，例如：/方舟盲盒 开 3".to_string(),
            Rejection::NonNumericBoxNumber => "序号必须是数字，例如：/方舟盲盒 开 3".to_string(),
            Rejection::OutOfRange { slots } => {
                format!("序号超出范围，请输入 1 ~ {} 之间的数字。", slots)
            }
            Rejection::NoActiveSession => {
                "你还没有选择盲盒种类，请先发送：/方舟盲盒 选择 <种类ID>".to_string()
            }
            Rejection::StaleSelection => "当前会话中的种类已失效，请重新选择。".to_string(),
            Rejection::NoStatusTarget => {
                "请使用：/方舟盲盒 状态 <种类ID> 或先选择种类后再查看状态。".to_string()
            }
        };
        Reply::text(text)
    }
}
