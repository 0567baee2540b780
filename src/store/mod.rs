pub mod users;

use self::users::User;
use mongodb::{
    bson::doc,
    error::{Error, ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use std::{fmt, time::Duration};

/// Database used when the DSN path does not name one.
pub const DEFAULT_DATABASE: &str = "ensaluti";

const USERS_COLLECTION: &str = "users";

// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Outcome of an insert attempt against the unique username/email indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    DuplicateIdentity,
}

/// Handle to the user collection. Constructed once at startup and handed to
/// the route handlers; cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct UserStore {
    client: Client,
    users: Collection<User>,
}

impl UserStore {
    /// Configure the client and pool. The driver connects lazily, so
    /// connection errors surface on the first query (index creation at
    /// startup) rather than here.
    pub async fn connect(dsn: &str) -> Result<Self, Error> {
        let mut options = ClientOptions::parse(dsn).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.min_pool_size = Some(1);
        options.max_pool_size = Some(5);
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let database = database_name(&options);
        let client = Client::with_options(options)?;
        let users = client.database(&database).collection(USERS_COLLECTION);

        Ok(Self { client, users })
    }

    /// The unique indexes back the "no two users share a username or an
    /// email" invariant. Concurrent signups race on the index, not on a
    /// read, so at most one of them can win.
    pub async fn ensure_indexes(&self) -> Result<(), Error> {
        let indexes = [unique_index("username"), unique_index("email")];
        self.users.create_indexes(indexes).await?;

        Ok(())
    }

    /// Insert a new user. A duplicate-key error from either unique index is
    /// reported as [`CreateOutcome::DuplicateIdentity`], not as a failure.
    pub async fn create(&self, user: &User) -> Result<CreateOutcome, Error> {
        match self.users.insert_one(user).await {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(err) if is_duplicate_key(&err) => Ok(CreateOutcome::DuplicateIdentity),
            Err(err) => Err(err),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.users.find_one(doc! { "username": username }).await
    }

    /// Close the connection pool.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

impl fmt::Debug for UserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserStore")
            .field("namespace", &self.users.namespace())
            .finish()
    }
}

fn unique_index(field: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(
            IndexOptions::builder()
                .name(format!("{field}_unique"))
                .unique(true)
                .build(),
        )
        .build()
}

fn is_duplicate_key(err: &Error) -> bool {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *err.kind {
        write_error.code == DUPLICATE_KEY
    } else {
        false
    }
}

fn database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}
