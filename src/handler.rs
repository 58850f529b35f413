// Rocket routes for the four Battlesnake endpoints
//
// Every route pulls the shared `Bot` out of managed state. Only `/move` does
// real work; it awaits the engine off the request thread.

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

use ninemo_snake::bot::Bot;
use ninemo_snake::types::GameState;

/// Snake metadata: API version, author and appearance
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// Logs the new game's board size and snake count
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Status {
    let req = start_req.into_inner();
    bot.start(&req.game, &req.turn, &req.board, &req.you);
    Status::Ok
}

/// One turn's decision as `{"move": <direction>, "shout": <stage>}`
///
/// The shout names the pipeline stage that produced the move, which makes
/// games easy to follow in the Battlesnake viewer.
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(bot: &rocket::State<Bot>, move_req: Json<GameState>) -> Json<Value> {
    let req = move_req.into_inner();
    Json(bot.get_move(&req.game, &req.turn, &req.board, &req.you).await)
}

#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    let req = end_req.into_inner();
    bot.end(&req.game, &req.turn, &req.board, &req.you);
    Status::Ok
}
