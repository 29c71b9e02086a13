//! Player, staff, checkin and points-ledger queries.

use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReturnDocument};
use uuid::Uuid;

use super::{
    error::{MongoDaoError, MongoResult},
    models::{
        CheckinDocument, PlayerDocument, PointsTransactionDocument, StaffDocument, doc_id, ts,
        uuid_as_binary,
    },
    store::{CHECKINS, MongoRoomStore, PLAYERS, POINTS_TRANSACTIONS, STAFF},
};
use crate::dao::models::{
    CheckinEntity, PlayerEntity, PointsTransactionEntity, StaffEntity,
};

impl MongoRoomStore {
    pub(super) async fn insert_player(&self, player: PlayerEntity) -> MongoResult<()> {
        let id = player.id;
        let document: PlayerDocument = player.into();
        self.players()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(PLAYERS, id))?;
        Ok(())
    }

    pub(super) async fn find_player(&self, id: Uuid) -> MongoResult<Option<PlayerEntity>> {
        let document = self
            .players()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::query(PLAYERS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn find_player_by_card(
        &self,
        card_number: &str,
    ) -> MongoResult<Option<PlayerEntity>> {
        let document = self
            .players()
            .find_one(doc! {"card_number": card_number})
            .await
            .map_err(MongoDaoError::query(PLAYERS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn find_player_by_phone(
        &self,
        phone: &str,
    ) -> MongoResult<Option<PlayerEntity>> {
        let document = self
            .players()
            .find_one(doc! {"phone": phone})
            .await
            .map_err(MongoDaoError::query(PLAYERS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn search_players(
        &self,
        search: Option<&str>,
        limit: i64,
    ) -> MongoResult<Vec<PlayerEntity>> {
        let filter = match search {
            Some(term) => doc! {
                "$or": [
                    {"first_name": {"$regex": term, "$options": "i"}},
                    {"card_number": {"$regex": term}},
                ]
            },
            None => doc! {},
        };

        let documents: Vec<PlayerDocument> = self
            .players()
            .find(filter)
            .limit(limit)
            .await
            .map_err(MongoDaoError::query(PLAYERS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(PLAYERS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn add_player_points(
        &self,
        id: Uuid,
        delta: i64,
    ) -> MongoResult<Option<PlayerEntity>> {
        let document = self
            .players()
            .find_one_and_update(
                doc_id(id),
                doc! {
                    "$inc": {"points": delta},
                    "$set": {"updated_at": ts(std::time::SystemTime::now())},
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::write_by_id(PLAYERS, id))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn set_player_rank(&self, id: Uuid, rank: u32) -> MongoResult<()> {
        self.players()
            .update_one(doc_id(id), doc! {"$set": {"rank": rank}})
            .await
            .map_err(MongoDaoError::write_by_id(PLAYERS, id))?;
        Ok(())
    }

    pub(super) async fn list_ranked_players(&self, limit: i64) -> MongoResult<Vec<PlayerEntity>> {
        let documents: Vec<PlayerDocument> = self
            .players()
            .find(doc! {"points": {"$gt": 0}})
            .sort(doc! {"points": -1})
            .limit(limit)
            .await
            .map_err(MongoDaoError::query(PLAYERS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(PLAYERS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn insert_staff(&self, staff: StaffEntity) -> MongoResult<()> {
        let id = staff.id;
        let document: StaffDocument = staff.into();
        self.staff()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(STAFF, id))?;
        Ok(())
    }

    pub(super) async fn find_staff_by_username(
        &self,
        username: &str,
    ) -> MongoResult<Option<StaffEntity>> {
        let document = self
            .staff()
            .find_one(doc! {"username": username})
            .await
            .map_err(MongoDaoError::query(STAFF))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn count_staff(&self) -> MongoResult<u64> {
        self.staff()
            .count_documents(doc! {})
            .await
            .map_err(MongoDaoError::query(STAFF))
    }

    pub(super) async fn insert_checkin(&self, checkin: CheckinEntity) -> MongoResult<()> {
        let id = checkin.id;
        let document: CheckinDocument = checkin.into();
        self.checkins()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(CHECKINS, id))?;
        Ok(())
    }

    pub(super) async fn find_open_checkin(
        &self,
        player_id: Uuid,
    ) -> MongoResult<Option<CheckinEntity>> {
        let document = self
            .checkins()
            .find_one(doc! {
                "player_id": uuid_as_binary(player_id),
                "checked_out_at": null,
            })
            .sort(doc! {"checked_in_at": -1})
            .await
            .map_err(MongoDaoError::query(CHECKINS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn save_checkin(&self, checkin: CheckinEntity) -> MongoResult<()> {
        let id = checkin.id;
        let document: CheckinDocument = checkin.into();
        self.checkins()
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write_by_id(CHECKINS, id))?;
        Ok(())
    }

    pub(super) async fn insert_points_transaction(
        &self,
        transaction: PointsTransactionEntity,
    ) -> MongoResult<()> {
        let id = transaction.id;
        let document: PointsTransactionDocument = transaction.into();
        self.points_transactions()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(POINTS_TRANSACTIONS, id))?;
        Ok(())
    }
}
