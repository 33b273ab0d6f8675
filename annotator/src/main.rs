use annotator_library::annotator::annotator::Annotator;

#[actix_web::main]
async fn main() {
    Annotator::run().await;
    Annotator::terminate().await;
}
