//! Tournaments, the flush promotion, food orders and the activity log.

use futures::TryStreamExt;
use mongodb::bson::doc;
use uuid::Uuid;

use super::{
    error::{MongoDaoError, MongoResult},
    models::{
        ActivityDocument, FlushJackpotDocument, FlushProgressDocument, FoodOrderDocument,
        RegistrationDocument, TournamentDocument, doc_id, uuid_as_binary,
    },
    store::{
        ACTIVITY_LOG, FLUSH_JACKPOTS, FLUSH_PROGRESS, FOOD_ORDERS, MongoRoomStore, REGISTRATIONS,
        TOURNAMENTS,
    },
};
use crate::dao::models::{
    ActivityEntity, ActivityFilter, FlushJackpotEntity, FlushProgressEntity, FlushSession,
    FoodOrderEntity, OrderStatus, RegistrationEntity, TournamentEntity,
};

impl MongoRoomStore {
    pub(super) async fn insert_tournament(&self, tournament: TournamentEntity) -> MongoResult<()> {
        let id = tournament.id;
        let document: TournamentDocument = tournament.into();
        self.tournaments()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(TOURNAMENTS, id))?;
        Ok(())
    }

    pub(super) async fn list_active_tournaments(&self) -> MongoResult<Vec<TournamentEntity>> {
        let documents: Vec<TournamentDocument> = self
            .tournaments()
            .find(doc! {"is_active": true})
            .sort(doc! {"date": 1})
            .await
            .map_err(MongoDaoError::query(TOURNAMENTS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(TOURNAMENTS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn find_tournament(&self, id: Uuid) -> MongoResult<Option<TournamentEntity>> {
        let document = self
            .tournaments()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::query(TOURNAMENTS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn insert_registration(
        &self,
        registration: RegistrationEntity,
    ) -> MongoResult<()> {
        let id = registration.id;
        let document: RegistrationDocument = registration.into();
        self.registrations()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(REGISTRATIONS, id))?;
        Ok(())
    }

    pub(super) async fn list_registrations(
        &self,
        tournament_id: Uuid,
    ) -> MongoResult<Vec<RegistrationEntity>> {
        let documents: Vec<RegistrationDocument> = self
            .registrations()
            .find(doc! {"tournament_id": uuid_as_binary(tournament_id)})
            .sort(doc! {"registered_at": 1})
            .await
            .map_err(MongoDaoError::query(REGISTRATIONS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(REGISTRATIONS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn find_registration_by_phone(
        &self,
        tournament_id: Uuid,
        phone: &str,
    ) -> MongoResult<Option<RegistrationEntity>> {
        let document = self
            .registrations()
            .find_one(doc! {
                "tournament_id": uuid_as_binary(tournament_id),
                "phone": phone,
            })
            .await
            .map_err(MongoDaoError::query(REGISTRATIONS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn increment_registered_count(&self, tournament_id: Uuid) -> MongoResult<()> {
        self.tournaments()
            .update_one(
                doc_id(tournament_id),
                doc! {"$inc": {"registered_count": 1}},
            )
            .await
            .map_err(MongoDaoError::write_by_id(TOURNAMENTS, tournament_id))?;
        Ok(())
    }

    pub(super) async fn find_flush_progress(
        &self,
        player_id: Uuid,
        session: FlushSession,
        session_date: &str,
    ) -> MongoResult<Option<FlushProgressEntity>> {
        let document = self
            .flush_progress()
            .find_one(doc! {
                "player_id": uuid_as_binary(player_id),
                "session": session.as_str(),
                "session_date": session_date,
            })
            .await
            .map_err(MongoDaoError::query(FLUSH_PROGRESS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn save_flush_progress(
        &self,
        progress: FlushProgressEntity,
    ) -> MongoResult<()> {
        let id = progress.id;
        let document: FlushProgressDocument = progress.into();
        self.flush_progress()
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(MongoDaoError::write_by_id(FLUSH_PROGRESS, id))?;
        Ok(())
    }

    pub(super) async fn list_flush_progress(
        &self,
        session: FlushSession,
        session_date: &str,
    ) -> MongoResult<Vec<FlushProgressEntity>> {
        let documents: Vec<FlushProgressDocument> = self
            .flush_progress()
            .find(doc! {
                "session": session.as_str(),
                "session_date": session_date,
            })
            .await
            .map_err(MongoDaoError::query(FLUSH_PROGRESS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(FLUSH_PROGRESS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_all_flush_progress(&self) -> MongoResult<Vec<FlushProgressEntity>> {
        let documents: Vec<FlushProgressDocument> = self
            .flush_progress()
            .find(doc! {})
            .await
            .map_err(MongoDaoError::query(FLUSH_PROGRESS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(FLUSH_PROGRESS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn delete_all_flush_progress(&self) -> MongoResult<u64> {
        let result = self
            .flush_progress()
            .delete_many(doc! {})
            .await
            .map_err(MongoDaoError::write(FLUSH_PROGRESS))?;
        Ok(result.deleted_count)
    }

    pub(super) async fn delete_incomplete_flush_progress(
        &self,
        session: FlushSession,
    ) -> MongoResult<u64> {
        let result = self
            .flush_progress()
            .delete_many(doc! {
                "session": session.as_str(),
                "completed_at": null,
            })
            .await
            .map_err(MongoDaoError::write(FLUSH_PROGRESS))?;
        Ok(result.deleted_count)
    }

    pub(super) async fn insert_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> MongoResult<()> {
        let id = jackpot.id;
        let document: FlushJackpotDocument = jackpot.into();
        self.flush_jackpots()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(FLUSH_JACKPOTS, id))?;
        Ok(())
    }

    pub(super) async fn list_flush_jackpots(&self) -> MongoResult<Vec<FlushJackpotEntity>> {
        let documents: Vec<FlushJackpotDocument> = self
            .flush_jackpots()
            .find(doc! {})
            .await
            .map_err(MongoDaoError::query(FLUSH_JACKPOTS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(FLUSH_JACKPOTS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn find_flush_jackpot(
        &self,
        session: FlushSession,
    ) -> MongoResult<Option<FlushJackpotEntity>> {
        let document = self
            .flush_jackpots()
            .find_one(doc! {"session": session.as_str()})
            .await
            .map_err(MongoDaoError::query(FLUSH_JACKPOTS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn save_flush_jackpot(&self, jackpot: FlushJackpotEntity) -> MongoResult<()> {
        let id = jackpot.id;
        let document: FlushJackpotDocument = jackpot.into();
        self.flush_jackpots()
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write_by_id(FLUSH_JACKPOTS, id))?;
        Ok(())
    }

    /// Each jackpot grows by its own configured increment, so this walks the
    /// documents rather than issuing a blanket update.
    pub(super) async fn apply_daily_jackpot_increment(&self) -> MongoResult<()> {
        let jackpots = self.list_flush_jackpots().await?;
        for jackpot in jackpots {
            self.flush_jackpots()
                .update_one(
                    doc_id(jackpot.id),
                    doc! {"$inc": {"amount": jackpot.daily_increment}},
                )
                .await
                .map_err(MongoDaoError::write_by_id(FLUSH_JACKPOTS, jackpot.id))?;
        }
        Ok(())
    }

    pub(super) async fn insert_food_order(&self, order: FoodOrderEntity) -> MongoResult<()> {
        let id = order.id;
        let document: FoodOrderDocument = order.into();
        self.food_orders()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(FOOD_ORDERS, id))?;
        Ok(())
    }

    pub(super) async fn find_food_order(&self, id: Uuid) -> MongoResult<Option<FoodOrderEntity>> {
        let document = self
            .food_orders()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::query(FOOD_ORDERS))?;
        Ok(document.map(Into::into))
    }

    pub(super) async fn save_food_order(&self, order: FoodOrderEntity) -> MongoResult<()> {
        let id = order.id;
        let document: FoodOrderDocument = order.into();
        self.food_orders()
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write_by_id(FOOD_ORDERS, id))?;
        Ok(())
    }

    pub(super) async fn list_orders_by_status(
        &self,
        statuses: &[OrderStatus],
    ) -> MongoResult<Vec<FoodOrderEntity>> {
        let status_strings: Vec<&str> = statuses
            .iter()
            .map(|status| match status {
                OrderStatus::Pending => "pending",
                OrderStatus::Preparing => "preparing",
                OrderStatus::Delivered => "delivered",
                OrderStatus::Cancelled => "cancelled",
            })
            .collect();

        let documents: Vec<FoodOrderDocument> = self
            .food_orders()
            .find(doc! {"status": {"$in": status_strings}})
            .sort(doc! {"created_at": 1})
            .await
            .map_err(MongoDaoError::query(FOOD_ORDERS))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(FOOD_ORDERS))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub(super) async fn count_food_orders(&self) -> MongoResult<u64> {
        self.food_orders()
            .count_documents(doc! {})
            .await
            .map_err(MongoDaoError::query(FOOD_ORDERS))
    }

    pub(super) async fn append_activity(&self, entry: ActivityEntity) -> MongoResult<()> {
        let id = entry.id;
        let document: ActivityDocument = entry.into();
        self.activity_log()
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write_by_id(ACTIVITY_LOG, id))?;
        Ok(())
    }

    pub(super) async fn list_activity(
        &self,
        filter: ActivityFilter,
    ) -> MongoResult<Vec<ActivityEntity>> {
        let mut query = doc! {};
        if let Some(action) = filter.action {
            query.insert("action", action.as_str());
        }
        if let Some(staff_name) = filter.staff_name {
            query.insert("staff_name", staff_name);
        }

        let documents: Vec<ActivityDocument> = self
            .activity_log()
            .find(query)
            .sort(doc! {"created_at": -1})
            .limit(filter.limit)
            .await
            .map_err(MongoDaoError::query(ACTIVITY_LOG))?
            .try_collect()
            .await
            .map_err(MongoDaoError::query(ACTIVITY_LOG))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }
}
