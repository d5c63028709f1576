use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Redis(#[from] fred::prelude::Error),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}
