//! Floor operations: the cash-game catalog, tables, seats and waitlists.

use std::time::SystemTime;

use futures::TryStreamExt;
use mongodb::bson::doc;
use uuid::Uuid;

use super::{
    error::{MongoDaoError, MongoResult},
    models::{SeatDocument, TableDocument, WaitlistEntryDocument, doc_id, ts},
    store::{GAMES, MongoRoomStore, SEATS, TABLES, WAITLIST},
};
use crate::dao::models::{CashGameEntity, SeatEntity, TableEntity, WaitlistEntryEntity};

impl MongoRoomStore {
    pub(super) async fn insert_game(&self, game: CashGameEntity) -> MongoResult<()> {
        let id = game.id;
        self.games()
            .insert_one(&game)
            .await
            .map_err(MongoDaoError::write_by_id(GAMES, id))?;
        Ok(())
    }

    pub(super) async fn list_active_games(&self) -> MongoResult<Vec<CashGameEntity>> {
        self.games()
            .find(doc! {"is_active": true})
            .await
            .map_err(MongoDaoError::query(GAMES))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(GAMES))
    }

    pub(super) async fn find_game(&self, id: Uuid) -> MongoResult<Option<CashGameEntity>> {
        self.games()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::query(GAMES))
    }

    pub(super) async fn find_game_by_code(
        &self,
        game_code: &str,
    ) -> MongoResult<Option<CashGameEntity>> {
        self.games()
            .find_one(doc! {"game_code": game_code})
            .await
            .map_err(MongoDaoError::query(GAMES))
    }

    pub(super) async fn save_game(&self, game: CashGameEntity) -> MongoResult<()> {
        let id = game.id;
        self.games()
            .replace_one(doc_id(id), &game)
            .await
            .map_err(MongoDaoError::write_by_id(GAMES, id))?;
        Ok(())
    }

    pub(super) async fn count_games(&self) -> MongoResult<u64> {
        self.games()
            .count_documents(doc! {})
            .await
            .map_err(MongoDaoError::query(GAMES))
    }

    pub(super) async fn insert_table(&self, table: TableEntity) -> MongoResult<()> {
        let id = table.id;
        let document: TableDocument = table.into();
        self.tables()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(TABLES, id))?;
        Ok(())
    }

    pub(super) async fn list_open_tables(&self) -> MongoResult<Vec<TableEntity>> {
        let documents: Vec<TableDocument> = self
            .tables()
            .find(doc! {"status": {"$ne": "closed"}})
            .sort(doc! {"table_number": 1})
            .await
            .map_err(MongoDaoError::query(TABLES))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(TABLES))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn find_table_by_number(
        &self,
        table_number: u32,
    ) -> MongoResult<Option<TableEntity>> {
        let document = self
            .tables()
            .find_one(doc! {"table_number": table_number})
            .sort(doc! {"opened_at": -1})
            .await
            .map_err(MongoDaoError::query(TABLES))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn find_open_table(
        &self,
        table_number: u32,
    ) -> MongoResult<Option<TableEntity>> {
        let document = self
            .tables()
            .find_one(doc! {"table_number": table_number, "status": "open"})
            .await
            .map_err(MongoDaoError::query(TABLES))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn close_table(
        &self,
        table_number: u32,
        closed_at: SystemTime,
    ) -> MongoResult<()> {
        self.tables()
            .update_many(
                doc! {"table_number": table_number, "status": {"$ne": "closed"}},
                doc! {"$set": {"status": "closed", "closed_at": ts(closed_at)}},
            )
            .await
            .map_err(MongoDaoError::write(TABLES))?;
        Ok(())
    }

    pub(super) async fn insert_seat(&self, seat: SeatEntity) -> MongoResult<()> {
        let id = seat.id;
        let document: SeatDocument = seat.into();
        self.seats()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(SEATS, id))?;
        Ok(())
    }

    pub(super) async fn list_seats_for_table(
        &self,
        table_number: u32,
    ) -> MongoResult<Vec<SeatEntity>> {
        let documents: Vec<SeatDocument> = self
            .seats()
            .find(doc! {"table_number": table_number})
            .sort(doc! {"seat_number": 1})
            .await
            .map_err(MongoDaoError::query(SEATS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(SEATS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn count_seats_for_table(&self, table_number: u32) -> MongoResult<u64> {
        self.seats()
            .count_documents(doc! {"table_number": table_number})
            .await
            .map_err(MongoDaoError::query(SEATS))
    }

    pub(super) async fn find_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> MongoResult<Option<SeatEntity>> {
        let document = self
            .seats()
            .find_one(doc! {"table_number": table_number, "seat_number": seat_number})
            .await
            .map_err(MongoDaoError::query(SEATS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn delete_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> MongoResult<bool> {
        let result = self
            .seats()
            .delete_one(doc! {"table_number": table_number, "seat_number": seat_number})
            .await
            .map_err(MongoDaoError::write(SEATS))?;
        Ok(result.deleted_count > 0)
    }

    pub(super) async fn delete_seats_for_table(&self, table_number: u32) -> MongoResult<u64> {
        let result = self
            .seats()
            .delete_many(doc! {"table_number": table_number})
            .await
            .map_err(MongoDaoError::write(SEATS))?;
        Ok(result.deleted_count)
    }

    pub(super) async fn insert_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> MongoResult<()> {
        let id = entry.id;
        let document: WaitlistEntryDocument = entry.into();
        self.waitlist()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(WAITLIST, id))?;
        Ok(())
    }

    pub(super) async fn find_waitlist_entry(
        &self,
        id: Uuid,
    ) -> MongoResult<Option<WaitlistEntryEntity>> {
        let document = self
            .waitlist()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn save_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> MongoResult<()> {
        let id = entry.id;
        let document: WaitlistEntryDocument = entry.into();
        self.waitlist()
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write_by_id(WAITLIST, id))?;
        Ok(())
    }

    pub(super) async fn list_active_waitlist(&self) -> MongoResult<Vec<WaitlistEntryEntity>> {
        let documents: Vec<WaitlistEntryDocument> = self
            .waitlist()
            .find(doc! {"status": {"$in": ["waiting", "called"]}})
            .sort(doc! {"position": 1})
            .await
            .map_err(MongoDaoError::query(WAITLIST))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_active_waitlist_for_game(
        &self,
        game_code: &str,
    ) -> MongoResult<Vec<WaitlistEntryEntity>> {
        let documents: Vec<WaitlistEntryDocument> = self
            .waitlist()
            .find(doc! {
                "game_code": game_code,
                "status": {"$in": ["waiting", "called"]},
            })
            .sort(doc! {"position": 1})
            .await
            .map_err(MongoDaoError::query(WAITLIST))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_active_waitlist_for_card(
        &self,
        card_number: &str,
    ) -> MongoResult<Vec<WaitlistEntryEntity>> {
        let documents: Vec<WaitlistEntryDocument> = self
            .waitlist()
            .find(doc! {
                "card_number": card_number,
                "status": {"$in": ["waiting", "called"]},
            })
            .await
            .map_err(MongoDaoError::query(WAITLIST))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn last_waitlist_position(
        &self,
        game_code: &str,
    ) -> MongoResult<Option<u32>> {
        let document = self
            .waitlist()
            .find_one(doc! {
                "game_code": game_code,
                "status": {"$in": ["waiting", "called"]},
            })
            .sort(doc! {"position": -1})
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;
        Ok(document.map(|entry| entry.position))
    }

    pub(super) async fn list_waiting_after(
        &self,
        game_code: &str,
        position: u32,
    ) -> MongoResult<Vec<WaitlistEntryEntity>> {
        let documents: Vec<WaitlistEntryDocument> = self
            .waitlist()
            .find(doc! {
                "game_code": game_code,
                "status": "waiting",
                "position": {"$gt": position},
            })
            .sort(doc! {"position": 1})
            .await
            .map_err(MongoDaoError::query(WAITLIST))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_expired_called(
        &self,
        now: SystemTime,
    ) -> MongoResult<Vec<WaitlistEntryEntity>> {
        let documents: Vec<WaitlistEntryDocument> = self
            .waitlist()
            .find(doc! {
                "status": "called",
                "expires_at": {"$lt": ts(now)},
            })
            .await
            .map_err(MongoDaoError::query(WAITLIST))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(WAITLIST))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn count_active_waitlist(&self) -> MongoResult<u64> {
        self.waitlist()
            .count_documents(doc! {"status": {"$in": ["waiting", "called"]}})
            .await
            .map_err(MongoDaoError::query(WAITLIST))
    }
}
